use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sketch_noise::{Noise, NoiseConfig};
use sketch_random::{DEFAULT_CHARSET, Generator, Seed};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Characters from darkest to brightest.
const RAMP: &[u8] = b" .:-=+*#%@";

#[derive(Debug, Parser)]
#[command(name = "sketch")]
#[command(about = "Preview seeded random sequences and simplex noise fields")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a 2D slice of a noise field as ASCII.
    Noise(NoiseArgs),
    /// Print values drawn from a seeded generator.
    Random(RandomArgs),
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// Integer or text seed; system entropy when omitted.
    #[arg(long, conflicts_with = "state", allow_negative_numbers = true)]
    seed: Option<String>,
    /// Explicit generator state as four comma separated words.
    #[arg(long, value_delimiter = ',')]
    state: Option<Vec<u32>>,
}

#[derive(Debug, Args)]
struct NoiseArgs {
    #[command(flatten)]
    seed: SeedArgs,
    /// JSON file holding `{"octaves": .., "falloff": ..}`.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    octaves: Option<u32>,
    #[arg(long)]
    falloff: Option<f64>,
    /// Distance in noise space between neighbouring characters.
    #[arg(long, default_value_t = 0.08)]
    scale: f64,
    #[arg(long, default_value_t = 64)]
    width: usize,
    #[arg(long, default_value_t = 24)]
    height: usize,
    /// Fixed third coordinate; samples 3D noise when set.
    #[arg(long)]
    z: Option<f64>,
    /// Fixed fourth coordinate; requires `--z`.
    #[arg(long, requires = "z")]
    w: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DrawKind {
    Float,
    Int,
    Bool,
    String,
}

#[derive(Debug, Args)]
struct RandomArgs {
    #[command(flatten)]
    seed: SeedArgs,
    #[arg(long, value_enum, default_value_t = DrawKind::Float)]
    kind: DrawKind,
    #[arg(long, short = 'n', default_value_t = 8)]
    count: usize,
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f64>,
    /// Length of each generated string.
    #[arg(long, default_value_t = 16)]
    length: usize,
    #[arg(long, default_value = DEFAULT_CHARSET)]
    charset: String,
    /// Print one shuffle of these items instead of drawing values.
    #[arg(long, num_args = 1..)]
    shuffle: Vec<String>,
}

impl SeedArgs {
    fn to_seed(&self) -> Result<Seed> {
        Ok(match (&self.state, &self.seed) {
            (Some(words), _) => Seed::try_from(words.as_slice())?,
            (None, Some(seed)) => parse_seed(seed),
            (None, None) => Seed::Entropy,
        })
    }
}

fn parse_seed(seed: &str) -> Seed {
    match seed.parse::<i64>() {
        Ok(value) => Seed::Integer(value),
        Err(_) => Seed::Text(seed.to_string()),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Noise(args) => run_noise(args),
        Commands::Random(args) => run_random(args),
    }
}

fn load_config(args: &NoiseArgs) -> Result<NoiseConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid noise config in {}", path.display()))?
        }
        None => NoiseConfig::default(),
    };
    if let Some(octaves) = args.octaves {
        config.octaves = octaves;
    }
    if let Some(falloff) = args.falloff {
        config.falloff = falloff;
    }
    config.validate()?;
    Ok(config)
}

fn shade(value: f64) -> char {
    let t = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
    let index = (t * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[index] as char
}

fn render(noise: &Noise, args: &NoiseArgs) -> Result<String> {
    let mut out = String::with_capacity((args.width + 1) * args.height);
    for row in 0..args.height {
        for column in 0..args.width {
            let x = column as f64 * args.scale;
            let y = row as f64 * args.scale;
            let value = match (args.z, args.w) {
                (Some(z), Some(w)) => noise.noise4(x, y, z, w)?,
                (Some(z), None) => noise.noise3(x, y, z)?,
                _ => noise.noise2(x, y)?,
            };
            out.push(shade(value));
        }
        out.push('\n');
    }
    Ok(out)
}

fn run_noise(args: NoiseArgs) -> Result<()> {
    let config = load_config(&args)?;
    let seed = args.seed.to_seed()?;
    debug!(seed = seed.kind(), "building noise field");
    let noise = Noise::from_seed(seed)?.with_config(config)?;
    info!(
        octaves = noise.octaves(),
        falloff = noise.falloff(),
        max_value = noise.max_value(),
        "rendering {}x{} preview",
        args.width,
        args.height
    );
    print!("{}", render(&noise, &args)?);
    Ok(())
}

fn run_random(args: RandomArgs) -> Result<()> {
    let mut random = Generator::new(args.seed.to_seed()?)?;

    if !args.shuffle.is_empty() {
        println!("{}", random.shuffle(&args.shuffle).join(" "));
        return Ok(());
    }

    for _ in 0..args.count {
        let line = match args.kind {
            DrawKind::Float => match (args.min, args.max) {
                (None, None) => random.random().to_string(),
                (None, Some(max)) => random.random_below(max)?.to_string(),
                (Some(min), Some(max)) => random.random_range(min, max)?.to_string(),
                (Some(_), None) => bail!("--min needs --max"),
            },
            DrawKind::Int => match (args.min, args.max) {
                (None, None) => random.random_int().to_string(),
                (None, Some(max)) => random.random_int_below(max as i64)?.to_string(),
                (Some(min), Some(max)) => {
                    random.random_int_range(min as i64, max as i64)?.to_string()
                }
                (Some(_), None) => bail!("--min needs --max"),
            },
            DrawKind::Bool => random.random_bool().to_string(),
            DrawKind::String => random.random_string(args.length, &args.charset),
        };
        println!("{line}");
    }
    Ok(())
}
