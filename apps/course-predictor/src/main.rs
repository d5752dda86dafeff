use std::sync::Arc;

use anyhow::{Context, Result};
use neet_pg_course_predictor::{
    CoursePredictorPage, HelperConfig, HttpQuotaSource, LoadOutcome, PageCatalog, PageHandle,
};
use neet_pg_page_model::{ClickTarget, NoticeOverlay, SubmitDecision};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "commands: course [name] | quota <name> | category <name> | rank <n> | submit | ok | backdrop | hover [in|out] | theme | show | help | quit";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = HelperConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    info!("course-predictor console starting");
    info!(
        "Configuration loaded: base_url={}, timeout={}s",
        config.base_url, config.request_timeout_secs
    );

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    let source = HttpQuotaSource::new(&config.base_url, config.request_timeout())
        .context("Failed to create quota source")?;
    let catalog = PageCatalog {
        courses: config.courses.clone(),
        categories: config.categories.clone(),
    };
    let page = Arc::new(
        CoursePredictorPage::mount(source, catalog, Arc::new(NoticeOverlay::new()))
            .context("Failed to mount course predictor page")?,
    );

    println!("{}", HELP);

    tokio::select! {
        result = run_console(Arc::clone(&page)) => {
            if let Err(e) = result {
                error!("Console error: {}", e);
                return Err(e);
            }
        }
        _ = shutdown_signal() => {
            info!("Received shutdown signal");
        }
    }

    page.dispose();
    info!("course-predictor console stopped");
    Ok(())
}

async fn run_console(page: Arc<PageHandle<HttpQuotaSource>>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        match command {
            "" => continue,
            "course" => match page.select_course(argument) {
                Ok(task) => {
                    let page = Arc::clone(&page);
                    tokio::spawn(async move {
                        match task.await {
                            Ok(LoadOutcome::Populated { .. }) => print_quotas(&page),
                            Ok(LoadOutcome::Cleared) => println!("quota list cleared"),
                            Ok(LoadOutcome::Failed(_)) => print_notice(&page),
                            Ok(LoadOutcome::Superseded { .. }) | Err(_) => {}
                        }
                    });
                }
                Err(e) => println!("{}", e),
            },
            "quota" => report(page.select_quota(argument)),
            "category" => report(page.select_category(argument)),
            "rank" => match page.input_rank(argument) {
                Ok(shown) => println!("rank: {}", shown),
                Err(e) => println!("{}", e),
            },
            "submit" => match page.submit() {
                Ok(SubmitDecision::Proceed(submission)) => println!(
                    "submitted: {}",
                    serde_json::to_string(&submission).context("Failed to encode submission")?
                ),
                Ok(SubmitDecision::Cancelled(_)) => print_notice(&page),
                Err(e) => println!("{}", e),
            },
            "ok" => {
                page.click_notice(ClickTarget::DismissButton);
            }
            "backdrop" => {
                page.click_notice(ClickTarget::Backdrop);
            }
            "hover" => {
                let style = page.hover_results(argument != "out");
                println!(
                    "results: transform={} transition={}",
                    style.transform,
                    style.transition.unwrap_or("unchanged")
                );
            }
            "theme" => println!("{}", page.stylesheet()),
            "show" => {
                println!("{:?}", page.form());
                print_quotas(&page);
                print_notice(&page);
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("unknown command: {}\n{}", other, HELP),
        }
    }

    Ok(())
}

fn report(result: Result<(), neet_pg_course_predictor::PageError>) {
    if let Err(e) = result {
        println!("{}", e);
    }
}

fn print_quotas(page: &PageHandle<HttpQuotaSource>) {
    let control = page.quota_control();
    for option in control.options() {
        let marker = if option.value == control.value() { "*" } else { " " };
        println!(" {} {}", marker, option.label);
    }
}

fn print_notice(page: &PageHandle<HttpQuotaSource>) {
    let notice = page.notice().view();
    if notice.visible {
        println!("[notice] {} (ok | backdrop to dismiss)", notice.message);
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .compact()
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
