use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use photoverse::{
    DirectorySink, ExportFormat, ExportJob, FitParams, FixedAdvance, FontBook, FontFiles,
    FontRole, ImageSource, Poem, ResultView, ResultViewOpts, TemplateKind, TextEngine,
};

#[derive(Parser, Debug)]
#[command(name = "photoverse", version, about = "Compose a poem over a photo and export it")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a share image as PNG.
    Render(ExportArgs),
    /// Export an A4 document as PDF.
    Pdf(ExportArgs),
    /// Print the shrink-to-fit result for a text as JSON.
    Fit(FitArgs),
    /// Run an export described by a JSON job file.
    Job(JobArgs),
}

#[derive(Args, Debug)]
struct PoemArgs {
    /// Poem title.
    #[arg(long, default_value = "")]
    title: String,

    /// Poem body; `\n` separates lines, a blank line separates stanzas.
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the body from a text file.
    #[arg(long)]
    body_file: Option<PathBuf>,
}

impl PoemArgs {
    fn poem(&self) -> anyhow::Result<Poem> {
        let body = match (&self.body, &self.body_file) {
            (Some(b), _) => b.replace("\\n", "\n"),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("read body '{}'", path.display()))?,
            (None, None) => String::new(),
        };
        Ok(Poem::new(self.title.clone(), body))
    }
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Serif regular face (body).
    #[arg(long)]
    font_serif: Option<PathBuf>,
    /// Serif bold face (title).
    #[arg(long)]
    font_serif_bold: Option<PathBuf>,
    /// Serif italic face (credit).
    #[arg(long)]
    font_serif_italic: Option<PathBuf>,
    /// Monospaced face (polaroid body).
    #[arg(long)]
    font_mono: Option<PathBuf>,
}

impl FontArgs {
    fn files(&self) -> FontFiles {
        FontFiles {
            serif: self.font_serif.clone(),
            serif_bold: self.font_serif_bold.clone(),
            serif_italic: self.font_serif_italic.clone(),
            mono: self.font_mono.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Photo to place under the poem.
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    poem: PoemArgs,

    /// Author credit.
    #[arg(long)]
    author: Option<String>,

    #[arg(long, value_enum, default_value_t = TemplateKind::Story)]
    template: TemplateKind,

    /// Output scale over the template's base resolution.
    #[arg(long, default_value_t = photoverse::DEFAULT_OUTPUT_SCALE)]
    scale: f64,

    /// Directory that receives the exported file.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct FitArgs {
    #[command(flatten)]
    poem: PoemArgs,

    #[arg(long)]
    width: f32,

    #[arg(long)]
    height: f32,

    #[arg(long, default_value_t = 32.0)]
    start: f32,

    #[arg(long, default_value_t = 14.0)]
    min: f32,

    #[arg(long, value_enum, default_value_t = FontRole::Body)]
    role: FontRole,

    /// Measure with fixed per-character advances instead of font files.
    #[arg(long)]
    fixed: bool,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_export(args, ExportFormat::Png),
        Command::Pdf(args) => cmd_export(args, ExportFormat::Pdf),
        Command::Fit(args) => cmd_fit(args),
        Command::Job(args) => cmd_job(args),
    }
}

fn load_fonts(files: &FontFiles) -> anyhow::Result<FontBook> {
    if files.is_empty() {
        return Ok(FontBook::from_system());
    }
    Ok(FontBook::from_files(files)?)
}

fn run_export(view: &ResultView, format: ExportFormat, out_dir: &Path) -> anyhow::Result<()> {
    let mut sink = DirectorySink::new(out_dir);
    match view.export(format, &mut sink) {
        Ok(outcome) => {
            if !outcome.missing_faces.is_empty() {
                eprintln!(
                    "warning: no font face for {:?}; that text is missing. Pass --font-* flags.",
                    outcome.missing_faces
                );
            }
            let location = outcome
                .artifact
                .location
                .unwrap_or_else(|| out_dir.join(&outcome.artifact.file_name));
            println!("{}", location.display());
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err).context("export failed")
        }
    }
}

fn cmd_export(args: ExportArgs, format: ExportFormat) -> anyhow::Result<()> {
    let fonts = load_fonts(&args.fonts.files())?;
    let view = ResultView::new(
        args.poem.poem()?,
        ImageSource::Path(args.image),
        fonts,
        ResultViewOpts {
            output_scale: args.scale,
            ..ResultViewOpts::default()
        },
    )
    .with_author(args.author)
    .with_template(args.template);
    run_export(&view, format, &args.out_dir)
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let poem = args.poem.poem()?;
    let params = FitParams::new(args.width, args.height, args.start, args.min, args.role);
    let result = if args.fixed {
        photoverse::fit(&poem.body, &params, &mut FixedAdvance::default())
    } else {
        let mut engine = TextEngine::new(load_fonts(&args.fonts.files())?);
        photoverse::fit(&poem.body, &params, &mut engine)
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_job(args: JobArgs) -> anyhow::Result<()> {
    let job = ExportJob::from_path(&args.in_path)?;
    let fonts = load_fonts(&job.fonts)?;
    let view = ResultView::from_job(&job, fonts)?;
    run_export(&view, job.format, &job.out_dir)
}
