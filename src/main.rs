use std::process::ExitCode;

use clap::Parser;
use plant_doctor::{cli, client, config, error, flow, interactive, logging, report};
use cli::{Cli, Commands};
use client::AnalysisClient;
use config::Config;
use error::Result;
use plant_doctor_common::{parse_analysis_body, render_result, Completion, Session};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, json } => {
            let client = AnalysisClient::from_config(&config, cli.server.as_deref())?;
            let mut session = Session::new();

            if !json {
                println!("🌱 plant-doctor - analyze\n");
            }

            // 1. 画像読み込み・プレビュー
            let summary = match flow::select_path(&mut session, &image) {
                Ok(summary) => summary,
                Err(err) => {
                    eprintln!("⚠️  {}", err);
                    return Ok(ExitCode::FAILURE);
                }
            };
            if !json {
                println!("{}\n", summary);
            }

            // 2. 解析
            match flow::run_analysis(&mut session, &client).await? {
                Completion::Rendered => {}
                _ => {
                    if let Some(banner) = session.view().error_banner {
                        eprintln!("⚠️  {}", banner);
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }

            // 3. 表示
            if let Some(result) = session.result() {
                if json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    println!("{}", report::format_report(&render_result(result)));
                }
            }
        }

        Commands::Show { input } => {
            let content = std::fs::read_to_string(&input)?;
            let result = parse_analysis_body(&content)?;
            println!("{}", report::format_report(&render_result(&result)));
        }

        Commands::Interactive => {
            let client = AnalysisClient::from_config(&config, cli.server.as_deref())?;
            interactive::run_interactive(&client).await?;
        }

        Commands::Ping => {
            let client = AnalysisClient::from_config(&config, cli.server.as_deref())?;
            match client.health().await {
                Ok(message) => println!("✔ {}: {}", client.service_url(), message),
                Err(err) => {
                    eprintln!("✖ {}: {}", client.service_url(), err);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Config { set_server, set_timeout, clear_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_service_url(url)?;
                println!("✔ Service URL saved");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(Some(seconds))?;
                println!("✔ Timeout saved");
            } else if clear_timeout {
                config.set_timeout(None)?;
                println!("✔ Timeout cleared");
            }

            if show {
                println!("Config:");
                println!("  service URL: {}", config.service_url(cli.server.as_deref()));
                println!(
                    "  timeout: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{}s", s))
                        .unwrap_or_else(|| "none".to_string())
                );
                println!("  file: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
