//! Schema CLI for the users database.
//!
//! Reads `DATABASE_URL`; e.g. `cargo run -p migration -- up` or `-- status`.

use migration::Migrator;

#[tokio::main]
async fn main() {
    sea_orm_migration::cli::run_cli(Migrator).await;
}
