use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{check_data, serve};

#[derive(Parser)]
#[command(name = "bankrust")]
#[command(about = "Recurring transfer scheduling service with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Directory holding accounts.json, beneficiaries.json and
        /// scheduled_transfers.json
        #[arg(short, long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,
        /// Address to bind the HTTP listener to
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Check the seed data files for shape and referential integrity
    ///
    /// Parses the three seed files the server loads at startup and reports
    /// dangling account/beneficiary references, non-positive amounts and
    /// schedule invariant violations without starting the server.
    CheckData {
        /// Directory holding the seed data files
        #[arg(short, long, env = "DATA_DIR", default_value = "data")]
        data_dir: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_dir,
                bind_address,
            } => {
                serve(&data_dir, &bind_address).await?;
            }
            Commands::CheckData { data_dir } => {
                check_data(&data_dir)?;
            }
        }
        Ok(())
    }
}
