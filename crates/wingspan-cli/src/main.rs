//! wingspan: step an animated curve scene and export what it draws.
//!
//! # Usage
//!
//! ```bash
//! # Pose the butterfly a quarter of the way through its cycle
//! wingspan --frames 2500
//!
//! # Export the globe as OBJ
//! wingspan --preset globe --obj globe.obj
//!
//! # Start a scene file from a preset
//! wingspan --preset butterfly --dump-config > butterfly.json
//! ```

mod obj;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use wingspan_core::{Result, Tolerance, WingspanError};
use wingspan_geometry::StreamRecorder;
use wingspan_mesh::MeshSink;
use wingspan_scene::{AnimationClock, DisplayOptions, Scene, SceneConfig};

fn print_usage() {
    eprintln!(
        r#"wingspan: animated curve and sphere scenes

USAGE:
    wingspan [OPTIONS]

OPTIONS:
    --preset <NAME>     Built-in scene: butterfly (default) or globe
    --scene <FILE>      Load a JSON scene instead of a preset
    --frames <N>        Clock ticks to advance before drawing [default: 0]
    --step <MS>         Milliseconds per tick [default: 1]
    --tolerance <T>     Sample curves adaptively to chord tolerance T
    --obj <FILE>        Write the drawn frame as Wavefront OBJ
    --dump-config       Print the scene as JSON and exit
    --help              Show this help message

Set RUST_LOG=debug for tessellation details.
"#
    );
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Preset(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
struct Options {
    source: Source,
    frames: u64,
    step_ms: u64,
    tolerance: Option<f64>,
    obj: Option<PathBuf>,
    dump_config: bool,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: Source::Preset("butterfly".to_string()),
            frames: 0,
            step_ms: 1,
            tolerance: None,
            obj: None,
            dump_config: false,
            help: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options> {
    fn value<'a>(flag: &str, iter: &mut impl Iterator<Item = &'a String>) -> Result<&'a String> {
        iter.next()
            .ok_or_else(|| WingspanError::InvalidArgument(format!("{flag} requires a value")))
    }
    fn number<T: std::str::FromStr>(flag: &str, text: &str) -> Result<T> {
        text.parse()
            .map_err(|_| WingspanError::InvalidArgument(format!("{flag}: '{text}' is not a number")))
    }

    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--preset" => options.source = Source::Preset(value(arg, &mut iter)?.clone()),
            "--scene" => options.source = Source::File(PathBuf::from(value(arg, &mut iter)?)),
            "--frames" => options.frames = number(arg, value(arg, &mut iter)?)?,
            "--step" => options.step_ms = number(arg, value(arg, &mut iter)?)?,
            "--tolerance" => {
                let tolerance: f64 = number(arg, value(arg, &mut iter)?)?;
                if tolerance.is_nan() || tolerance <= 0.0 {
                    return Err(WingspanError::InvalidArgument(
                        "--tolerance must be positive".to_string(),
                    ));
                }
                options.tolerance = Some(tolerance);
            }
            "--obj" => options.obj = Some(PathBuf::from(value(arg, &mut iter)?)),
            "--dump-config" => options.dump_config = true,
            other => {
                return Err(WingspanError::InvalidArgument(format!(
                    "unknown argument '{other}'"
                )))
            }
        }
    }
    Ok(options)
}

fn load_config(source: &Source) -> Result<SceneConfig> {
    match source {
        Source::File(path) => SceneConfig::load(path),
        Source::Preset(name) => match name.as_str() {
            "butterfly" => Ok(SceneConfig::butterfly()),
            "globe" => Ok(SceneConfig::globe()),
            other => Err(WingspanError::NotFound(format!("preset '{other}'"))),
        },
    }
}

fn run(options: &Options) -> Result<()> {
    let config = load_config(&options.source)?;
    if options.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut scene = Scene::from_config(&config)?;
    let mut clock = AnimationClock::new(scene.cycle_ms());
    let mut phase = clock.phase();
    for _ in 0..options.frames {
        phase = clock.advance(options.step_ms);
        scene.update(phase);
    }
    if options.frames == 0 {
        scene.update(phase);
    }
    log::info!("advanced {} ticks to phase {:.4}", options.frames, phase.value());

    let display = match options.tolerance {
        Some(tolerance) => DisplayOptions::default().with_tolerance(tolerance),
        None => DisplayOptions::default(),
    };

    let mut recorder = StreamRecorder::new();
    scene.build_static(&mut recorder);
    scene.draw(&display, &mut recorder);

    let mut sink = MeshSink::new();
    scene.build_static(&mut sink);
    scene.draw(&display, &mut sink);
    let batch = sink.finish();

    println!("phase:      {:.4}", phase.value());
    println!("curves:     {}", scene.curves().len());
    println!("spheres:    {}", scene.spheres().len());
    println!("groups:     {}", recorder.groups().len());
    println!("vertices:   {}", recorder.vertex_count());
    println!("triangles:  {}", batch.mesh.triangle_count());
    println!("polylines:  {}", batch.polylines.len());
    if let Some(bounds) = scene.bounds() {
        println!("bounds:     {} .. {}", bounds.min, bounds.max);
    }
    if batch.mesh.triangle_count() > 0 {
        let welded = batch.mesh.weld(Tolerance::loose());
        println!(
            "welded:     {} vertices, {} open edges{}",
            welded.vertex_count(),
            welded.open_edge_count(),
            if welded.is_closed() { " (closed)" } else { "" }
        );
    }

    if let Some(path) = &options.obj {
        let mut out = BufWriter::new(File::create(path)?);
        obj::write_obj(&batch, &mut out)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}\n");
            print_usage();
            process::exit(1);
        }
    };
    if options.help {
        print_usage();
        return;
    }

    if let Err(e) = run(&options) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
