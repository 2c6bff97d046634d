// Interactive ClipScope client: reads commands from stdin, analysis runs in the background
use std::io::{stdout, Write};
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clipscope_ai::AnalysisClient;
use clipscope_common_ui::{render, Controller};
use clipscope_tui::render::paint;
use clipscope_tui::{dispatch, Args, Osc52Clipboard};

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    // Logs go to stderr so they never mix with the OSC 52 sequences on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt(controller: &Controller) -> std::io::Result<()> {
    let screen = render(&controller.snapshot());
    print!("{}> ", if screen.form.submit_enabled { "clipscope" } else { "analyzing" });
    stdout().flush()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    let provider_config = args.provider_config()?;
    let model = provider_config.default_model.clone();
    let client = AnalysisClient::from_config(provider_config)?;
    info!("Using {} provider with model {}", client.provider_name(), model);

    let mut controller = Controller::new(args.session_config(), Arc::new(client), Arc::new(Osc52Clipboard::new()));
    if let Some(target) = args.share_target() {
        info!("Sharing through '{}'", target.program());
        controller = controller.with_share_target(Arc::new(target));
    }

    println!("{}", paint(&render(&controller.snapshot())));
    println!("\nType 'help' for available commands.\n");

    if let Some(url) = &args.url {
        let (_, output) = dispatch(&format!("analyze {}", url), &mut controller).await;
        if let Some(msg) = output {
            println!("{}", msg);
        }
    }

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut at_eof = false;

    loop {
        prompt(&controller)?;

        tokio::select! {
            line = reader.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => {
                        at_eof = true;
                        break;
                    }
                };

                let (quit_requested, output) = dispatch(&line, &mut controller).await;
                if let Some(msg) = output {
                    println!("{}", msg);
                }
                if quit_requested {
                    break;
                }
            }
            _ = controller.next_completion(), if controller.is_busy() => {
                println!("\n{}", paint(&render(&controller.snapshot())));
            }
        }
    }

    // Piped input ends before the last analysis does; let it finish.
    if at_eof && controller.is_busy() {
        controller.next_completion().await;
        println!("{}", paint(&render(&controller.snapshot())));
    }

    if let Some(message) = controller.session().error() {
        error!("Last analysis failed: {}", message);
    }
    Ok(())
}
