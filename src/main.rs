use anyhow::Result;
use clap::Parser;

use xlate_cli::cli::commands::{configure, translate};
use xlate_cli::cli::{Args, Command};
use xlate_cli::output::{self, OutputConfig};
use xlate_cli::translation::print_languages;
use xlate_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exitcode::SOFTWARE);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure {
            show,
            source,
            target,
            group_size,
            dictionary,
        }) => {
            configure::run_configure(configure::ConfigureOptions {
                show,
                source,
                target,
                group_size,
                dictionary,
            })?;
        }
        None => {
            let Some(file) = args.file else {
                anyhow::bail!(
                    "Missing input file\n\n\
                     Usage: xlate -s <source> -t <target> <file>\n\
                     Run 'xlate --help' for details."
                );
            };

            let options = translate::TranslateOptions {
                file,
                source: args.source,
                target: args.target,
                sep: args.sep,
                chunk_size: args.chunk_size,
                output: args.output,
                dictionary: args.dictionary,
                column: args.column,
                skip: args.skip,
                sheet: args.sheet,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
