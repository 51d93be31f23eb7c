//! Bridges between YAML configuration types and runtime service types.
//!
//! Converts a `PrettyPrintConfig` into a ready-to-share `PrettyPrintService`.

use snippet_prettifier_config::PrettyPrintConfig;

use super::external_formatter::ExternalCommandFormatter;
use super::service::PrettyPrintService;
use super::traits::SourceFormatter;

/// Create a service backed by the configured external command, or `None` if no
/// formatter command is configured.
pub fn create_service_from_config(
    config: &PrettyPrintConfig,
) -> Option<PrettyPrintService<ExternalCommandFormatter>> {
    let Some(formatter_config) = &config.formatter else {
        log::info!("No formatter command configured, pretty-printing disabled");
        return None;
    };
    let formatter = ExternalCommandFormatter::from_config(formatter_config);
    Some(service_with_formatter(config, formatter))
}

/// Create a service around any formatter, sized and tuned from `config`.
pub fn service_with_formatter<F: SourceFormatter>(
    config: &PrettyPrintConfig,
    formatter: F,
) -> PrettyPrintService<F> {
    PrettyPrintService::new(formatter, config.capacity_bytes).with_lookahead(config.lookahead_window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prettifier::testing::ScriptedFormatter;
    use snippet_prettifier_config::FormatterCommandConfig;

    #[test]
    fn test_no_formatter_means_no_service() {
        assert!(create_service_from_config(&PrettyPrintConfig::default()).is_none());
    }

    #[test]
    fn test_service_sized_from_config() {
        let config = PrettyPrintConfig {
            capacity_bytes: 2048,
            formatter: Some(FormatterCommandConfig {
                command: "sqlfmt".to_string(),
                args: vec![],
                timeout_ms: None,
            }),
            ..Default::default()
        };
        let service = create_service_from_config(&config).unwrap();
        assert_eq!(service.stats().cache.capacity_bytes, 2048);
    }

    #[tokio::test]
    async fn test_lookahead_from_config() {
        let config = PrettyPrintConfig {
            lookahead_window: 0,
            ..Default::default()
        };
        let service = service_with_formatter(&config, ScriptedFormatter::uppercase());
        let entry = service.format("abc").await;
        assert_eq!(entry.map_at(0), None);
    }
}
