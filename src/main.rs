//! notewave: render, play and inspect text music notation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use notewave::audio::{save_wav, PlaybackOutcome, Player};
use notewave::effects::Effect;
use notewave::library::{load_or_builtin, volume_or_default};
use notewave::{Config, Instrument, Renderer, Tempo, TimeSignature, WaveBuffer};

#[derive(Parser)]
#[command(name = "notewave", version, about = "Render text music notation to audio")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render notation or a library piece to a WAV file
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Play notation or a library piece on the default output device
    Play {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Respell notation with canonical pitch names and durations
    Canonize { notes: String },
    /// Pad or extend every measure to fit a time signature
    Align {
        notes: String,
        #[arg(short, long)]
        signature: TimeSignature,
    },
    /// Show MIDI number, canonical name and frequency of pitch tokens
    Pitch {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Print the frequency table
    Table,
    /// List library compositions
    List,
}

#[derive(Args)]
struct SourceArgs {
    /// Notation, e.g. "C4/4 D4/4 E4/2 | G4/1"
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    notes: Option<String>,
    /// Library composition to use instead of NOTES
    #[arg(short, long)]
    name: Option<String>,
    /// Beats per minute
    #[arg(short, long)]
    tempo: Option<f64>,
    /// Time signature, e.g. 3/4
    #[arg(short, long)]
    signature: Option<TimeSignature>,
    #[arg(short, long)]
    instrument: Option<Instrument>,
    /// Volume in (0, 1]
    #[arg(long)]
    volume: Option<f64>,
    /// Post effect (echo, reverb, distortion); repeat to chain
    #[arg(short, long)]
    effect: Vec<Effect>,
}

/// Everything needed to turn a source into audio.
struct Job {
    notes: String,
    tempo: Tempo,
    signature: TimeSignature,
    instrument: Instrument,
    volume: f64,
    effects: Vec<Effect>,
}

impl Job {
    fn resolve(args: SourceArgs, config: &Config) -> notewave::Result<Self> {
        let (notes, tempo, signature, instrument, volume) = match &args.name {
            Some(name) => {
                let library = load_or_builtin(&config.library_path())?;
                let piece = library.require(name)?;
                (
                    piece.notes.clone(),
                    piece.tempo,
                    piece.time_signature()?,
                    Instrument::from_name(piece.instrument()),
                    piece.volume(),
                )
            }
            None => (
                args.notes.clone().unwrap_or_default(),
                config.tempo,
                config.time_signature()?,
                config.instrument(),
                config.volume(),
            ),
        };
        if let Some(v) = args.volume.filter(|&v| volume_or_default(Some(v)) != v) {
            warn!(volume = v, "volume outside (0, 1], using the default");
        }
        Ok(Self {
            notes,
            tempo: Tempo::new(args.tempo.unwrap_or(tempo))?,
            signature: args.signature.unwrap_or(signature),
            instrument: args.instrument.unwrap_or(instrument),
            volume: volume_or_default(Some(args.volume.unwrap_or(volume))),
            effects: args.effect,
        })
    }

    fn render(&self, config: &Config, stop: &AtomicBool) -> WaveBuffer {
        let mut renderer = Renderer::new(self.signature)
            .with_resolver(config.resolver())
            .with_synthesizer(config.synthesizer());
        info!(
            instrument = %self.instrument,
            bpm = self.tempo.bpm(),
            signature = %self.signature,
            "rendering"
        );
        let dry = renderer.render_until(&self.notes, self.tempo, self.instrument, self.volume, stop);
        self.effects
            .iter()
            .fold(dry, |buffer, effect| effect.apply(&buffer))
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "notewave=debug" } else { "notewave=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn stop_flag() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop);
    if let Err(err) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)) {
        warn!(%err, "could not install Ctrl-C handler");
    }
    stop
}

fn run(command: Command, config: &Config) -> notewave::Result<()> {
    match command {
        Command::Render { source, output } => {
            let job = Job::resolve(source, config)?;
            let stop = stop_flag();
            let buffer = job.render(config, &stop);
            save_wav(&output, &buffer)?;
            println!(
                "wrote {} ({:.2}s)",
                output.display(),
                buffer.duration_secs()
            );
        }
        Command::Play { source } => {
            let job = Job::resolve(source, config)?;
            let stop = stop_flag();
            let buffer = job.render(config, &stop);
            if stop.load(Ordering::Relaxed) {
                return Ok(());
            }
            let player = Player::new()?;
            match player.play(&buffer, &stop)? {
                PlaybackOutcome::Finished => {}
                PlaybackOutcome::Interrupted => println!("stopped"),
            }
        }
        Command::Canonize { notes } => {
            let renderer = Renderer::default().with_resolver(config.resolver());
            println!("{}", renderer.canonize(&notes));
        }
        Command::Align { notes, signature } => {
            let renderer = Renderer::new(signature).with_resolver(config.resolver());
            let bars: Vec<String> = renderer
                .align_measures(&notes)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{}", bars.join(" | "));
        }
        Command::Pitch { tokens } => {
            let resolver = config.resolver();
            for token in &tokens {
                if notewave::pitch::is_rest(token) {
                    println!("{token}\t-\trest\t0.00 Hz");
                    continue;
                }
                let midi = resolver.parse(token)?;
                println!(
                    "{token}\t{midi}\t{}\t{:.2} Hz",
                    resolver.to_canonical_name(midi),
                    resolver.to_frequency(midi)
                );
            }
        }
        Command::Table => {
            let mut rows: Vec<(String, f64)> = config.resolver().frequency_table().into_iter().collect();
            rows.sort_by(|a, b| a.1.total_cmp(&b.1));
            for (name, freq) in rows {
                println!("{name}\t{freq:.2}");
            }
        }
        Command::List => {
            let library = load_or_builtin(&config.library_path())?;
            for piece in library.all() {
                println!(
                    "{}\t{} @ {} bpm\t{}",
                    piece.name,
                    piece.signature,
                    piece.tempo,
                    piece.instrument()
                );
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load();
    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
