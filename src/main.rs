use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use opcdriver::{perturb, Driver, DriverConfig, ExclusionSet, SimConnector, DEFAULT_JITTER};

/// OPC panel variable driver: discover, export, and perturb panel tags
#[derive(Debug, Parser)]
#[command(name = "opcdriver", version, about)]
struct Cli {
    /// The OPC server address
    #[arg(long = "server_address", default_value = "localhost")]
    server_address: String,

    /// The OPC server port
    #[arg(long = "server_port", default_value_t = 4870)]
    server_port: u16,

    /// The OPC protocol
    #[arg(long = "protocol", default_value = "opc.tcp")]
    protocol: String,

    /// The OPC objects node name
    #[arg(long = "objects_node_name", default_value = "WinCC Panel RT")]
    objects_node_name: String,

    /// Snapshot file to export discovered variables to
    #[arg(long = "snapshot", default_value = "variables.json")]
    snapshot: PathBuf,

    /// Also write a randomly perturbed copy and apply it back to the panel
    #[arg(long = "perturb")]
    perturb: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DriverConfig {
        server_address: cli.server_address,
        server_port: cli.server_port,
        protocol: cli.protocol,
        objects_node_name: cli.objects_node_name,
    };

    let connector = SimConnector::default_panel();
    let mut driver = Driver::connect(&connector, &config)?;

    let variables = driver.export_variables(&cli.snapshot)?;
    println!(
        "Found {} variables, exported to {}",
        variables.len(),
        cli.snapshot.display()
    );

    if cli.perturb {
        let copy_path = perturbed_copy_path(&cli.snapshot);
        let perturbed = perturb(&variables, &ExclusionSet::default_tags(), DEFAULT_JITTER);
        opcdriver::export(&perturbed, &copy_path)?;
        let applied = driver.apply_variables(&perturbed)?;
        println!(
            "Applied {} perturbed values from {}",
            applied,
            copy_path.display()
        );
    }

    driver.disconnect();
    Ok(())
}

/// Sibling path for the perturbed snapshot, e.g. `variables_copy.json`
fn perturbed_copy_path(snapshot: &Path) -> PathBuf {
    let stem = snapshot
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "variables".to_string());
    snapshot.with_file_name(format!("{}_copy.json", stem))
}
