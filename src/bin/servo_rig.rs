//! Command listener for the four-servo rig.
//!
//! Opens the configured serial device (or stdin with `--console`) and
//! runs the command interpreter against it. Without the `rpi` feature
//! servo writes are traced rather than actuated, which makes the binary
//! usable as a dry-run harness on any machine.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use servo_rig::serial::BAUD_RATE;
use servo_rig::{CommandSource, ConsoleSource, Interpreter, SerialSource, ServoBank, SystemPacer};

/// Command listener for the four-servo rig
#[derive(Parser, Debug)]
#[command(name = "servo_rig")]
#[command(about = "Serial command listener for the four-servo rig")]
#[command(version)]
struct Args {
    /// Serial device carrying the command stream
    #[arg(long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Baud rate of the command link
    #[arg(long, default_value_t = BAUD_RATE)]
    baud: u32,

    /// Read commands from stdin instead of a serial device
    #[arg(long)]
    console: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let servos = make_bank()?;

    if args.console {
        info!("Reading commands from stdin");
        let source = ConsoleSource::new(std::io::stdin().lock());
        run(source, servos)
    } else {
        info!("Listening on {} at {} baud", args.port, args.baud);
        let source = SerialSource::open(&args.port, args.baud)?;
        run(source, servos)
    }
}

#[cfg(feature = "rpi")]
fn make_bank() -> Result<servo_rig::rpi::GpioServoBank> {
    Ok(servo_rig::rpi::GpioServoBank::new()?)
}

#[cfg(not(feature = "rpi"))]
fn make_bank() -> Result<servo_rig::TraceServoBank> {
    Ok(servo_rig::TraceServoBank)
}

fn run<S: CommandSource, B: ServoBank>(source: S, servos: B) -> Result<()> {
    let mut rig = Interpreter::new(source, servos, SystemPacer, std::io::stdout());
    rig.start()?;
    rig.run()?;
    Ok(())
}
