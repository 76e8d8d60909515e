use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use footingx::{
    build_in_host, render_build_summary, render_reaction, BridgeTransport, Config, FormFields,
    FormState, FrameModel, ImportError, RecordingTransport, Session, Status, Transport,
};

/// Shear-wall footing design and frame automation for an external analysis host.
#[derive(Parser, Debug)]
#[command(name = "footingx", version)]
struct Cli {
    /// JSON configuration file with `bridge` and `provisions` sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Design a footing from typed loads
    Design(DesignArgs),
    /// Import a support reaction from the host, then design if soil and material data are given
    Import(ImportArgs),
    /// Build the demonstration frame in the host and run the analysis
    BuildFrame {
        /// Record the command sequence to this JSON file instead of contacting the host
        #[arg(long, value_name = "FILE")]
        dry_run: Option<PathBuf>,
    },
}

/// Free-text design fields, parsed the same way the form parses them.
#[derive(Args, Debug, Default)]
struct DesignFields {
    /// Allowable soil bearing (kN/m²)
    #[arg(long)]
    sbc: Option<String>,
    /// Concrete strength f'c (MPa)
    #[arg(long)]
    fc: Option<String>,
    /// Steel yield strength fy (MPa)
    #[arg(long)]
    fy: Option<String>,
    /// Wall length (m)
    #[arg(long)]
    wall_length: Option<String>,
    /// Wall thickness (m)
    #[arg(long)]
    wall_thickness: Option<String>,
    /// Write the plan view to this SVG file
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,
    /// Print the full design as JSON after the report
    #[arg(long)]
    json: bool,
}

impl DesignFields {
    fn is_complete(&self) -> bool {
        self.sbc.is_some()
            && self.fc.is_some()
            && self.fy.is_some()
            && self.wall_length.is_some()
            && self.wall_thickness.is_some()
    }

    fn fill(&self, fields: &mut FormFields) {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        fields.sbc = text(&self.sbc);
        fields.fc = text(&self.fc);
        fields.fy = text(&self.fy);
        fields.wall_length = text(&self.wall_length);
        fields.wall_thickness = text(&self.wall_thickness);
    }
}

#[derive(Args, Debug)]
struct DesignArgs {
    /// Factored axial load Pu (kN)
    #[arg(long, allow_hyphen_values = true)]
    pu: String,
    /// Factored moment Mu (kN·m)
    #[arg(long, allow_hyphen_values = true)]
    mu: String,
    #[command(flatten)]
    fields: DesignFields,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Support node number
    #[arg(long)]
    node: String,
    /// Load case number
    #[arg(long)]
    load_case: String,
    /// Serve reactions from this JSON file instead of the host
    #[arg(long, value_name = "FILE")]
    reactions: Option<PathBuf>,
    #[command(flatten)]
    fields: DesignFields,
}

/// Print a status line, errors to stderr.
fn show(status: &Status) {
    match status {
        Status::Idle => {}
        Status::Info(message) => println!("{message}"),
        Status::Error(message) => eprintln!("{message}"),
    }
}

/// Run the design action and print the report, with optional JSON and SVG output.
fn run_design(
    form: &mut FormState,
    fields: &DesignFields,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let result = form.run_design(&config.provisions);
    show(&form.status);
    let design = result?;

    if let Some(report) = &form.report {
        println!("{report}");
    }
    if fields.json {
        println!("{}", serde_json::to_string_pretty(&design)?);
    }
    if let (Some(path), Some(plan)) = (&fields.svg, &form.plan) {
        fs::write(path, plan.render_svg(600))?;
        log::info!("plan written to {}", path.display());
    }
    Ok(())
}

/// Open a session on the bridge, or on a reaction file for offline imports.
fn open_session(
    reactions: Option<&Path>,
    config: &Config,
) -> Result<Session<Box<dyn Transport>>, ImportError> {
    let transport: Box<dyn Transport> = match reactions {
        Some(path) => Box::new(RecordingTransport::from_reaction_file(path)?),
        None => Box::new(BridgeTransport::connect(&config.bridge)?),
    };
    Ok(Session::new(transport))
}

fn main() -> Result<(), Box<dyn Error>> {
    // Progress goes through `log`; RUST_LOG overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The config file is optional. Environment variables win over it for the
    // bridge settings.
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Mode::Design(args) => {
            // Typed loads go straight to the design, as if entered in the form.
            let mut form = FormState::default();
            form.fields.pu = args.pu;
            form.fields.mu = args.mu;
            args.fields.fill(&mut form.fields);
            run_design(&mut form, &args.fields, &config)?;
        }
        Mode::Import(args) => {
            let mut form = FormState::default();
            form.fields.node = args.node;
            form.fields.load_case = args.load_case;
            args.fields.fill(&mut form.fields);

            // A reaction file stands in for the host when one is given.
            let mut session = match open_session(args.reactions.as_deref(), &config) {
                Ok(session) => session,
                Err(error) => {
                    form.connection_failed(&error);
                    show(&form.status);
                    return Err(error.into());
                }
            };
            let result = form.import_reactions(&mut session);
            show(&form.status);
            let loads = result?;
            print!("{}", render_reaction(&loads));

            // Designing needs soil and material data as well as the loads.
            if args.fields.is_complete() {
                run_design(&mut form, &args.fields, &config)?;
            }
        }
        Mode::BuildFrame { dry_run } => {
            // The demonstration frame is validated locally before any host
            // command is sent.
            let model = FrameModel::demonstration()?;
            let summary = match dry_run {
                Some(path) => {
                    // Dry run: the recorder answers every command and the
                    // sequence is written out for inspection.
                    let mut session = Session::new(RecordingTransport::new());
                    let summary = build_in_host(&model, &mut session)?;
                    fs::write(&path, session.transport().to_json()?)?;
                    log::info!(
                        "{} commands recorded to {}",
                        summary.commands,
                        path.display()
                    );
                    summary
                }
                None => {
                    // The host needs an empty model open. A failed command stops
                    // the build and leaves what was created so far.
                    let mut session = Session::new(BridgeTransport::connect(&config.bridge)?);
                    build_in_host(&model, &mut session)?
                }
            };
            print!("{}", render_build_summary(&summary));
        }
    }

    Ok(())
}
