use argh::FromArgs;
use std::path::PathBuf;

use rawfx::{
    frame::{Frame, FrameSize, PlanarFrame},
    imgproc,
};

#[derive(FromArgs)]
/// Apply a pixel kernel to a raw frame file
struct Args {
    /// path to the raw input frame (RGB24, or I420 for sobel)
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to write the raw output frame
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// frame width in pixels
    #[argh(option)]
    width: usize,

    /// frame height in pixels
    #[argh(option)]
    height: usize,

    /// the kernel: despeckle, autostretch, color-enhance, sobel or unsharp
    #[argh(option, short = 'k')]
    kernel: String,

    /// despeckle window radius
    #[argh(option, default = "1")]
    radius: usize,

    /// grow and shrink the despeckle window per pixel
    #[argh(switch)]
    adaptive: bool,

    /// feed despeckle results back into the source
    #[argh(switch)]
    recursive: bool,

    /// despeckle dark exclusion level
    #[argh(option, default = "7")]
    black_level: u8,

    /// despeckle bright exclusion level
    #[argh(option, default = "248")]
    white_level: u8,

    /// zero the sobel border instead of replicating edge samples
    #[argh(switch)]
    no_mirror: bool,

    /// use |gx| + |gy| as the sobel magnitude
    #[argh(switch)]
    abs_magnitude: bool,

    /// clamp the sobel magnitude instead of rescaling it
    #[argh(switch)]
    clamp: bool,

    /// unsharp sigma, negative to blur
    #[argh(option, default = "6.0")]
    sigma: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let size = FrameSize {
        width: args.width,
        height: args.height,
    };

    let data = std::fs::read(&args.input)?;
    log::info!("read {} bytes from {}", data.len(), args.input.display());

    let output = match args.kernel.to_lowercase().as_str() {
        "despeckle" => {
            let config = imgproc::despeckle::DespeckleConfig::new()
                .with_radius(args.radius)
                .with_adaptive(args.adaptive)
                .with_recursive(args.recursive)
                .with_levels(args.black_level, args.white_level);

            let src = Frame::<3>::new(size, data)?;
            let mut dst = Frame::<3>::from_size_val(size, 0)?;
            imgproc::despeckle::despeckle(&src, &mut dst, &config)?;
            dst.into_vec()
        }
        "autostretch" => {
            let src = Frame::<3>::new(size, data)?;
            let mut dst = Frame::<3>::from_size_val(size, 0)?;
            imgproc::enhance::autostretch_hsv(&src, &mut dst)?;
            dst.into_vec()
        }
        "color-enhance" => {
            let src = Frame::<3>::new(size, data)?;
            let mut dst = Frame::<3>::from_size_val(size, 0)?;
            imgproc::enhance::color_enhance(&src, &mut dst)?;
            dst.into_vec()
        }
        "sobel" => {
            let config = imgproc::edge::SobelConfig::new()
                .with_mirror_border(!args.no_mirror)
                .with_absolute_magnitude(args.abs_magnitude)
                .with_clamp_output(args.clamp);

            let src = PlanarFrame::new(size, data)?;
            let mut dst = PlanarFrame::from_size_val(size, 0, 0)?;
            imgproc::edge::sobel_magnitude(&src, &mut dst, &config)?;
            dst.into_vec()
        }
        "unsharp" => {
            let config = imgproc::sharpen::UnsharpConfig::new().with_sigma(args.sigma);

            let src = Frame::<3>::new(size, data)?;
            let mut dst = Frame::<3>::from_size_val(size, 0)?;
            imgproc::sharpen::unsharp_mask(&src, &mut dst, &config)?;
            dst.into_vec()
        }
        _ => {
            return Err(format!("Invalid kernel: {}", args.kernel).into());
        }
    };

    std::fs::write(&args.output, &output)?;
    log::info!("wrote {} bytes to {}", output.len(), args.output.display());

    Ok(())
}
