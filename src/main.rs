use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::orchestrator::PaymentOrchestrator;
use payflow::config::Config;
use payflow::infrastructure::http::HttpTransport;
use payflow::infrastructure::in_memory::InMemorySessionStore;
use payflow::interfaces::console::{ConsoleNotifier, StdinFormProcessor};
use payflow::interfaces::reporter::ResultReporter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about = "Run a hosted-form payment against a merchant server", long_about = None)]
struct Cli {
    /// Amount in minor currency units (overrides PAYFLOW_AMOUNT)
    #[arg(long)]
    amount: Option<u64>,

    /// Currency code (overrides PAYFLOW_CURRENCY)
    #[arg(long)]
    currency: Option<String>,

    /// Merchant order id (overrides PAYFLOW_ORDER_ID)
    #[arg(long)]
    order_id: Option<String>,

    /// Offer card registration in the hosted form
    #[arg(long)]
    register: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().into_diagnostic()?;
    if let Some(amount) = cli.amount {
        config.amount = amount;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }
    if let Some(order_id) = cli.order_id {
        config.order_id = order_id;
    }
    if cli.register {
        config.ask_register_pay = true;
    }

    tracing::info!(server = %config.server_url, mode = %config.mode, "starting payment");
    let request = config.payment_request().into_diagnostic()?;
    let orchestrator = PaymentOrchestrator::new(
        Box::new(HttpTransport::new(&config)),
        Box::new(InMemorySessionStore::new()),
        Box::new(StdinFormProcessor::new(config.public_key.clone())),
        ResultReporter::new(Box::new(ConsoleNotifier)),
    );

    let outcome = orchestrator.start_payment(request).await.into_diagnostic()?;
    tracing::info!(verified = outcome.verified, "payment attempt finished");

    Ok(())
}
