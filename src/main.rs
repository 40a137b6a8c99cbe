use checkout_kit::application::discount::{checked_discount, discounted_price};
use checkout_kit::application::payment::PaymentProcessor;
use checkout_kit::application::user_lookup::UserLookup;
use checkout_kit::config::{Settings, StorageSettings};
use checkout_kit::domain::money::Currency;
use checkout_kit::domain::ports::QueryExecutorBox;
use checkout_kit::domain::user::UserRecord;
use checkout_kit::infrastructure::in_memory::InMemoryUserStore;
use checkout_kit::infrastructure::sandbox::SandboxGateway;
use checkout_kit::interfaces::csv::user_reader::UserReader;
use checkout_kit::telemetry;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the discount for a price and a percentage
    Discount {
        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,
        #[arg(long, allow_negative_numbers = true)]
        percentage: Decimal,
    },
    /// Look up a user by id
    User {
        id: String,

        /// CSV file with an `id` column used to seed the user store
        #[arg(long)]
        users_csv: Option<PathBuf>,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Charge a card through the sandbox gateway
    Charge {
        #[arg(long, allow_negative_numbers = true)]
        amount: String,
        #[arg(long)]
        card: String,
        #[arg(long)]
        idempotency_key: Option<String>,
        /// Overrides payment.timeout_ms
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Overrides payment.currency
        #[arg(long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_logger(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref()).into_diagnostic()?;

    match cli.command {
        Command::Discount { price, percentage } => {
            let discount = checked_discount(price, percentage).into_diagnostic()?;
            let final_price = discounted_price(price, percentage).into_diagnostic()?;
            println!("discount: {discount}");
            println!("final price: {final_price}");
        }
        Command::User {
            id,
            users_csv,
            db_path,
        } => {
            if users_csv.is_some() {
                settings.storage.users_csv = users_csv;
            }
            if db_path.is_some() {
                settings.storage.db_path = db_path;
            }

            let lookup = UserLookup::new(user_store(&settings.storage).await?);
            match lookup.find_user_by_raw_id(&id).await.into_diagnostic()? {
                Some(user) => println!("{}", serde_json::to_string(&user).into_diagnostic()?),
                None => println!("not found"),
            }
        }
        Command::Charge {
            amount,
            card,
            idempotency_key,
            timeout_ms,
            currency,
        } => {
            if let Some(timeout_ms) = timeout_ms {
                settings.payment.timeout_ms = timeout_ms;
            }
            if let Some(currency) = currency {
                settings.payment.currency = Currency::new(currency).into_diagnostic()?;
            }
            settings.validate().into_diagnostic()?;

            let processor = PaymentProcessor::new(Box::new(SandboxGateway::new()), settings.payment);
            let outcome = processor
                .process_raw_payment(&amount, &card, idempotency_key.as_deref())
                .await
                .into_diagnostic()?;

            println!("{}", serde_json::to_string(&outcome).into_diagnostic()?);
            outcome.into_result().into_diagnostic()?;
        }
    }

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
async fn user_store(storage: &StorageSettings) -> Result<QueryExecutorBox> {
    use checkout_kit::infrastructure::rocksdb::RocksDbUserStore;

    let Some(db_path) = &storage.db_path else {
        return in_memory_store(storage).await;
    };

    // Use persistent storage (RocksDB), seeded from the CSV when one is given
    let store = RocksDbUserStore::open(db_path).into_diagnostic()?;
    if let Some(path) = &storage.users_csv {
        for user in read_users(path)? {
            store.insert(user).into_diagnostic()?;
        }
    }
    Ok(Box::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
async fn user_store(storage: &StorageSettings) -> Result<QueryExecutorBox> {
    if storage.db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    in_memory_store(storage).await
}

async fn in_memory_store(storage: &StorageSettings) -> Result<QueryExecutorBox> {
    let store = InMemoryUserStore::new();
    if let Some(path) = &storage.users_csv {
        for user in read_users(path)? {
            store.insert(user).await;
        }
    }
    Ok(Box::new(store))
}

/// Reads every valid row of a users CSV, logging and skipping the bad ones.
fn read_users(path: &Path) -> Result<Vec<UserRecord>> {
    let file = File::open(path).into_diagnostic()?;
    let mut users = Vec::new();
    for result in UserReader::new(file).users().into_diagnostic()? {
        match result {
            Ok(user) => users.push(user),
            Err(e) => warn!("Error reading user row: {e}"),
        }
    }
    Ok(users)
}
