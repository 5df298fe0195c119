use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(target_os = "linux", target_os = "android"))] {
        use amg88xx::*;
        use amg88xx::linux::{self, OpenError};
        use argh::FromArgs;
        use textplots::{Chart, Plot, Shape};
        use std::thread::sleep;
        use std::time::Duration;
        use indicatif::{ProgressBar, ProgressStyle};
        use std::fs::File;
        use std::io::Write;
        use std::error::Error as ErrorTrait;
        use std::iter;
        use linux_embedded_hal::I2CError;

        #[derive(FromArgs)]
        #[argh(description = "capture amg88xx frames and plot their mean temperature")]
        struct InputArgs {
            #[argh(positional)]
            bus: String,
            #[argh(option, short='a', default = "DEFAULT_ADDRESS", from_str_fn(from_base_16), description = "sensor address (hex)")]
            addr: u8,
            #[argh(option, short='n', default = "default_num_frames()", description = "number of frames to take")]
            num: u32,
            #[argh(option, short='r', default = "FrameRate::Fps10", from_str_fn(get_frame_rate), description = "frames per second (1 or 10)")]
            rate: FrameRate,
            #[argh(switch, description = "decode and write registers exactly like earlier drivers")]
            faithful: bool,
            #[argh(option, short='o', description = "out json file")]
            out_file: Option<String>
        }

        #[derive(Debug)]
        #[allow(dead_code)]
        enum CaptureError {
            Open(OpenError),
            Amg88xx(amg88xx::Error<I2CError>),
            OutputError(Box<dyn ErrorTrait>)
        }

        impl From<OpenError> for CaptureError {
            fn from(open_err: OpenError) -> CaptureError {
                CaptureError::Open(open_err)
            }
        }

        impl From<amg88xx::Error<I2CError>> for CaptureError {
            fn from(amg_err: amg88xx::Error<I2CError>) -> CaptureError {
                CaptureError::Amg88xx(amg_err)
            }
        }

        fn default_num_frames() -> u32 {
            100
        }

        fn from_base_16(val: &str) -> Result<u8, String> {
            let no_prefix = val.trim_start_matches("0x");

            match u8::from_str_radix(no_prefix, 16) {
                Ok(v) => Ok(v),
                Err(_) => {
                    Err("Unable to convert address from base 16".into())
                }
            }
        }

        fn get_frame_rate(val: &str) -> Result<FrameRate, String> {
            match val {
                "1" => Ok(FrameRate::Fps1),
                "10" => Ok(FrameRate::Fps10),
                _ => Err("Invalid frame rate (expected 1 or 10)".into()),
            }
        }

        fn mean(frame: &Frame) -> f32 {
            frame.iter().map(|t| f32::from(*t)).sum::<f32>() / PIXEL_COUNT as f32
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn main() -> Result<(), CaptureError> {
    let args: InputArgs = argh::from_env();

    let policy = if args.faithful { Policy::faithful() } else { Policy::default() };
    let config = Config { frame_rate: args.rate, ..Config::default() };
    let mut amg = linux::open(&args.bus, args.addr, &config, policy)?;
    let mut points: Vec<(f32, f32)> = Vec::new();
    let mut data: Vec<Vec<f64>> = Vec::new();

    let bar = ProgressBar::new(args.num as u64);
    bar.set_style(ProgressStyle::default_bar().progress_chars("#>-"));

    let frame_time = args.rate.period_ms();
    println!(
        "Capturing data (1 frame every {} milliseconds)",
        frame_time
    );

    (0..args.num)
        .zip(iter::repeat_with(|| amg.read_frame()))
        .try_for_each(|(i, f)| {
            let frame = f?;

            points.push((i as f32, mean(&frame)));
            data.push(frame.celsius().to_vec());

            sleep(Duration::from_millis((frame_time - 10).into())); // ~10 millis for 64 pixel reads.
            bar.inc(1);

            Ok::<_, CaptureError>(())
        })?;

    bar.finish();

    println!(
        "\ny = mean of {} frames (1 every {} milliseconds)",
        args.num, frame_time
    );
    Chart::new(120, 60, 0.0, args.num as f32)
        .lineplot(&Shape::Steps(&points))
        .display();

    let json_str = serde_json::to_string(&data).map_err(|e| CaptureError::OutputError(Box::new(e)))?;

    if let Some(out) = args.out_file {
        let mut file = File::create(out).map_err(|e| CaptureError::OutputError(Box::new(e)))?;
        file.write_all(json_str.as_bytes())
            .map_err(|e| CaptureError::OutputError(Box::new(e)))?;
    } else {
        println!("\n{}", json_str);
    }

    // Closes the bus.
    drop(amg.free());

    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn main() {}
