use clap::{Parser, ValueEnum};
use pdf_links::{HalfTurnPolicy, MissingActionPolicy};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per link: view rect and URL
    Plain,
    /// Page geometry followed by every link with its annotation reference
    Debug,
}

#[derive(Parser)]
#[command(name = "pdf-links")]
#[command(about = "List the hyperlink regions of a PDF page", long_about = None)]
struct Args {
    /// PDF file to read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Page number, 1-based (clamped to the document)
    #[arg(short = 'n', long, default_value_t = 1)]
    page: u32,

    /// Password for encrypted PDFs
    #[arg(short, long)]
    password: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Skip links without a URI action instead of stopping at the first one
    #[arg(long)]
    skip_missing_actions: bool,

    /// Mirror the Y axis on pages rotated by 180 degrees
    #[arg(long)]
    mirror_half_turn: bool,

    /// Log scan decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let mut builder = pdf_links::PageLinksExtractor::builder();
    if let Some(password) = args.password {
        builder = builder.password(password);
    }
    if args.skip_missing_actions {
        builder = builder.missing_action(MissingActionPolicy::SkipAnnotation);
    }
    if args.mirror_half_turn {
        builder = builder.half_turn(HalfTurnPolicy::MirrorY);
    }

    let page = match builder.build().from_path(&args.file, args.page) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error extracting links from {:?}: {}", args.file, e);
            std::process::exit(1);
        }
    };

    match args.format {
        OutputFormat::Plain => {
            print!("{}", page);
        }
        OutputFormat::Debug => {
            let g = &page.geometry;
            println!("Page {}:", page.page_number);
            println!("  Rotation: {}", g.rotation);
            println!("  View size: {}x{}", g.page_width, g.page_height);
            println!("  Offset: ({:.1}, {:.1})", g.offset_x, g.offset_y);

            if page.links.is_empty() {
                println!("  (no links)");
            }
            for (idx, link) in page.links.iter().enumerate() {
                println!("  Link {}: {}", idx, link.annotation);
                println!(
                    "    Rect: x {:.1} y {:.1} w {:.1} h {:.1}",
                    link.rect.origin.x,
                    link.rect.origin.y,
                    link.rect.size.width,
                    link.rect.size.height
                );
                match &link.url {
                    Some(url) => println!("    URL: {}", url),
                    None => println!("    URL: (none)"),
                }
            }
        }
    }
}
