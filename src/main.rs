use clap::Parser;
use solr_etl::config::{CliConfig, Command, TomlConfig};
use solr_etl::utils::{logger, validation::Validate};
use solr_etl::{IndexingEngine, LocalStorage, RedactionSet, SolrClient};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting solr-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(config: CliConfig) -> solr_etl::Result<()> {
    // 連線設定可以來自 CLI 旗標或 TOML 檔
    let (client, redaction, output_path) = match &config.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            let redaction = RedactionSet::new(
                file_config
                    .redact()
                    .unwrap_or(config.redact.as_slice())
                    .iter()
                    .cloned(),
            );
            let output_path = file_config
                .output_path()
                .unwrap_or(&config.output_path)
                .to_string();
            (SolrClient::new(&file_config), redaction, output_path)
        }
        None => {
            config.validate()?;
            (
                SolrClient::new(&config),
                RedactionSet::new(config.redact.iter().cloned()),
                config.output_path.clone(),
            )
        }
    };

    let storage = LocalStorage::new(".".to_string());
    let engine = IndexingEngine::new(client, storage, redaction);

    match &config.command {
        Command::Describe { sample_size } => {
            let snapshot_path = join_output(&output_path, "solr_metadata.json");
            let descriptor = engine.describe_to_file(*sample_size, &snapshot_path).await?;
            println!(
                "✅ Metadata extraction complete! JSON saved at: {}",
                snapshot_path
            );
            println!(
                "📊 Core '{}' holds {} documents ({} bytes)",
                descriptor.core_name, descriptor.num_documents, descriptor.index_size_bytes
            );
        }
        Command::Index {
            file,
            raw,
            no_commit,
        } => {
            let outcome = engine.index_file(file, *raw, !*no_commit).await?;
            println!(
                "✅ {} documents successfully indexed!",
                outcome.submitted_count
            );
            if let Some(message) = &outcome.server_message {
                tracing::debug!("Server response: {}", message);
            }
        }
        Command::Transform { file, output } => {
            let output_file = join_output(&output_path, output);
            let batch = engine.transform_to_file(file, &output_file).await?;
            println!("✅ JSON transformation complete! Saved as '{}'", output_file);
            if !batch.rejected.is_empty() {
                println!(
                    "🔶 {} records rejected (see log for details)",
                    batch.rejected.len()
                );
            }
        }
    }

    Ok(())
}

fn join_output(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name)
}
