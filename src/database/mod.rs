pub mod recipe_store;
#[cfg(test)]
pub mod memory;

pub use recipe_store::*;

use crate::config::DatabaseConfig;
use crate::utils::AppError;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use std::future::IntoFuture;
use std::time::Duration;

/// Só o ping (start-up e /health) tem prazo; as operações de dados usam os
/// timeouts padrão do driver.
pub const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Monta o client a partir da configuração. O driver conecta de forma
    /// preguiçosa: aqui só falham URI inválida ou lookup SRV.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        let client = Client::with_options(client_options(config).await?)?;
        let db = client.database(&config.name);

        Ok(Self { client, db })
    }

    /// Round-trip ao servidor (`ping`), limitado a `PING_TIMEOUT`
    pub async fn ping(&self) -> Result<(), AppError> {
        match tokio::time::timeout(PING_TIMEOUT, self.db.run_command(doc! { "ping": 1 }).into_future()).await {
            Ok(result) => {
                result?;
                Ok(())
            }
            Err(_) => Err(AppError::DatabaseError(format!(
                "ping timed out after {}s",
                PING_TIMEOUT.as_secs()
            ))),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Opções do client: Stable API v1 (strict + deprecation errors), demais
/// valores no padrão do driver
async fn client_options(config: &DatabaseConfig) -> Result<ClientOptions, AppError> {
    let uri = config.connection_uri();
    let mut client_options = ClientOptions::parse(uri.as_str()).await?;

    client_options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );

    Ok(client_options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn local_config(url: &str) -> DatabaseConfig {
        let mut config = AppConfig::from_lookup(|_| None).unwrap().database;
        config.url = Some(url.to_string());
        config
    }

    #[tokio::test]
    async fn test_client_options_keep_driver_timeouts() {
        let options = client_options(&local_config("mongodb://127.0.0.1:27017")).await.unwrap();

        assert!(options.server_selection_timeout.is_none());
        assert!(options.connect_timeout.is_none());
        assert!(options.server_api.is_some());
    }

    #[tokio::test]
    async fn test_ping_is_bounded_when_server_is_down() {
        // porta 1: nada escutando, a seleção de servidor nunca completa
        let db = MongoDB::new(&local_config("mongodb://127.0.0.1:1")).await.unwrap();

        let started = std::time::Instant::now();
        let result = db.ping().await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert!(started.elapsed() < PING_TIMEOUT + Duration::from_secs(5));
    }
}
