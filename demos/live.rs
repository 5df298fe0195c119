use cfg_if::cfg_if;
use std::io::{stdout, Write};

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use crossterm::{cursor, ExecutableCommand};
        use amg88xx::*;
        use argh::FromArgs;
        // no_std crates don't have access to the Error trait. However, because amg88xx crate
        // error types impl Display, we can use the eyre crate to ad-hoc convert our error types
        // to ones that impl Error via the eyre! macro.
        use eyre::{eyre, Result};
        use std::thread::sleep;
        use std::time::Duration;

        #[derive(FromArgs)]
        #[argh(description = "show a live amg88xx thermal grid")]
        struct InputArgs {
            #[argh(positional)]
            bus: String,
            #[argh(option, short='a', default = "DEFAULT_ADDRESS", from_str_fn(from_base_16), description = "sensor address (hex)")]
            addr: u8,
            #[argh(switch, description = "decode and write registers exactly like earlier drivers")]
            faithful: bool,
        }

        fn from_base_16(val: &str) -> Result<u8, String> {
            match u8::from_str_radix(val.trim_start_matches("0x"), 16) {
                Ok(v) => Ok(v),
                Err(_) => {
                    Err("Unable to convert address from base 16".into())
                }
            }
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<()> {
    let args: InputArgs = argh::from_env();

    let policy = if args.faithful { Policy::faithful() } else { Policy::default() };
    let mut amg = linux::open(&args.bus, args.addr, &Config::default(), policy)?;

    let ambient = amg
        .thermistor()
        .map_err(|e| eyre!("failed to read the thermistor: {}", e))?;
    println!("Ambient temp is {} C. Press Ctrl-C to stop.", ambient);

    let mut stdout = stdout();

    loop {
        let frame = amg
            .read_frame()
            .map_err(|e| eyre!("failed to read a frame: {}", e))?;

        stdout.execute(cursor::SavePosition)?;
        for row in frame.rows() {
            for t in row {
                write!(stdout, "{:>7.2}", f32::from(*t))?;
            }
            write!(stdout, "\r\n")?;
        }
        stdout.execute(cursor::RestorePosition)?;
        stdout.flush()?;

        sleep(Duration::from_secs(1));
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
