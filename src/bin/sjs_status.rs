//! Print the jars, contexts and jobs of a Spark Job Server.
//!
//! ```sh
//! export SPARK_JOBSERVER_URL='http://jobserver:8090'
//! # optional
//! export SPARK_JOBSERVER_USERNAME='admin' SPARK_JOBSERVER_PASSWORD='...'
//! export SPARK_JOBSERVER_FAILOVER_URLS='http://standby-1:8090,http://standby-2:8090'
//! cargo run --bin sjs-status
//! ```

use sjs_api::{HostRotation, JobServerClient};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut client = JobServerClient::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  export SPARK_JOBSERVER_URL='http://jobserver:8090'");
        std::process::exit(1);
    });

    if let Ok(hosts) = std::env::var("SPARK_JOBSERVER_FAILOVER_URLS") {
        let hosts: Vec<&str> = hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .collect();
        let max_retries = u32::try_from(hosts.len()).unwrap_or(u32::MAX);
        match HostRotation::new(max_retries, hosts) {
            Ok(rotation) => {
                info!(hosts = ?rotation.hosts(), "Failover enabled");
                client = client.with_failover(rotation);
            }
            Err(e) => {
                eprintln!("Error: SPARK_JOBSERVER_FAILOVER_URLS: {e}");
                std::process::exit(1);
            }
        }
    }

    println!("Spark Job Server at {}\n", client.endpoint());

    match client.list_jars().await {
        Ok(mut jars) => {
            jars.sort_by(|a, b| a.jar_name.cmp(&b.jar_name));
            println!("Jars ({}):", jars.len());
            for jar in jars {
                println!("  {:<32} {}", jar.jar_name, jar.uploaded_time);
            }
        }
        Err(e) => eprintln!("  Failed to list jars: {e}"),
    }

    match client.list_contexts().await {
        Ok(contexts) => {
            println!("\nContexts ({}):", contexts.len());
            for context in contexts {
                println!("  {context}");
            }
        }
        Err(e) => eprintln!("  Failed to list contexts: {e}"),
    }

    match client.list_jobs().await {
        Ok(jobs) => {
            println!("\nJobs ({}):", jobs.len());
            for job in jobs {
                println!(
                    "  {:<38} {:<10} {:<20} {}",
                    job.job_id, job.status, job.context, job.class_path
                );
                if let Some(message) = job.error.as_ref().and_then(|e| e.message.as_deref()) {
                    println!("      error: {message}");
                }
            }
        }
        Err(e) => eprintln!("  Failed to list jobs: {e}"),
    }
}
