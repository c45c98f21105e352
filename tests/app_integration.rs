use std::fs;
use std::path::Path;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(symbol: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        mount_quote(&mock_server, symbol, mock_response).await;
        mock_server
    }

    pub async fn mount_quote(mock_server: &MockServer, symbol: &str, mock_response: &str) {
        let url_path = format!("/v8/finance/chart/{symbol}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(mock_server)
            .await;
    }

    pub fn quote_body(price: f64, currency: &str) -> String {
        format!(
            r#"{{
                "chart": {{
                    "result": [{{
                        "meta": {{
                            "regularMarketPrice": {price},
                            "currency": "{currency}"
                        }}
                    }}]
                }}
            }}"#
        )
    }
}

fn write_config(dir: &Path, base_url: &str, vix_symbol: &str, loan: f64) -> std::path::PathBuf {
    let config_path = dir.join("config.yaml");
    let data_path = dir.join("data");
    let config_content = format!(
        r#"
currency: "TWD"
data_path: "{}"
providers:
  yahoo:
    base_url: "{}"
vix_symbol: "{}"
loan_amount: {}
"#,
        data_path.display(),
        base_url,
        vix_symbol,
        loan
    );
    fs::write(&config_path, config_content).expect("Failed to write config file");
    config_path
}

#[test_log::test(tokio::test)]
async fn test_margin_flow_with_mocked_quotes() {
    let mock_server = test_utils::create_mock_server("0052.TW", &test_utils::quote_body(43.0, "TWD")).await;
    test_utils::mount_quote(&mock_server, "QQQ", &test_utils::quote_body(500.0, "USD")).await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 1_000_000.0);

    // Seed the holdings table; the 4-digit code must be looked up as 0052.TW
    let data_path = dir.path().join("data");
    fs::create_dir_all(&data_path).unwrap();
    fs::write(
        data_path.join("positions.csv"),
        "symbol,quantity\n0052,20000\nQQQ,100\n",
    )
    .unwrap();

    let result = invctl::run_command(
        invctl::AppCommand::Margin { loan: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Margin command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_advise_flow_with_mocked_vix() {
    // VIX at 35 lands between the default 30 and 40 rules
    let mock_server = test_utils::create_mock_server("VIX", &test_utils::quote_body(35.0, "USD")).await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 0.0);

    let result = invctl::run_command(
        invctl::AppCommand::Advise {
            cnn: 0.71,
            cboe: 0.66,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Advise command failed with: {:?}",
        result.err()
    );

    // First touch seeds the rule table with its defaults
    let rules_csv = fs::read_to_string(dir.path().join("data").join("rules.csv")).unwrap();
    assert!(rules_csv.starts_with("threshold,action\n"));
    assert!(rules_csv.contains("30.0"));
}

#[test_log::test(tokio::test)]
async fn test_advise_degrades_when_vix_fetch_fails() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/VIX"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 0.0);

    // A failed quote degrades to a visible indicator, not an error exit
    let result = invctl::run_command(
        invctl::AppCommand::Advise {
            cnn: 0.71,
            cboe: 0.66,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Advise should degrade gracefully, got: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_trade_and_capital_logs_round_trip() {
    let mock_server = wiremock::MockServer::start().await;
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 0.0);
    let config = config_path.to_str().unwrap();

    let result = invctl::run_command(
        invctl::AppCommand::Trades(invctl::TradesCommand::Add {
            date: None,
            symbol: "0052".to_string(),
            action: "buy".to_string(),
            price: Some(43.2),
            quantity: Some(1000.0),
            amount: 43_200.0,
            note: None,
        }),
        Some(config),
    )
    .await;
    assert!(result.is_ok(), "Trade add failed: {:?}", result.err());

    let result = invctl::run_command(
        invctl::AppCommand::Capital(invctl::CapitalCommand::Add {
            date: None,
            kind: "Deposit".to_string(),
            amount: 500_000.0,
            note: Some("initial funding".to_string()),
        }),
        Some(config),
    )
    .await;
    assert!(result.is_ok(), "Capital add failed: {:?}", result.err());

    let trades_csv = fs::read_to_string(dir.path().join("data").join("trades.csv")).unwrap();
    assert!(trades_csv.contains("0052,Buy,43.2,1000.0,43200.0"));

    let capital_csv = fs::read_to_string(dir.path().join("data").join("capital.csv")).unwrap();
    assert!(capital_csv.starts_with("date,type,amount,note\n"));
    assert!(capital_csv.contains("Deposit,500000.0,initial funding"));

    let result = invctl::run_command(
        invctl::AppCommand::Trades(invctl::TradesCommand::List),
        Some(config),
    )
    .await;
    assert!(result.is_ok(), "Trade list failed: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_performance_flow_with_seeded_logs() {
    let mock_server = test_utils::create_mock_server("0052.TW", &test_utils::quote_body(50.0, "TWD")).await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 100_000.0);

    let data_path = dir.path().join("data");
    fs::create_dir_all(&data_path).unwrap();
    fs::write(data_path.join("positions.csv"), "symbol,quantity\n0052,10000\n").unwrap();
    fs::write(
        data_path.join("trades.csv"),
        "date,symbol,action,price,quantity,total_amount,note\n\
         2024-02-01,0052,Buy,43.2,10000,432000.0,\n\
         2024-03-01,0052,Sell,50.0,1000,50000.0,trim\n",
    )
    .unwrap();
    fs::write(
        data_path.join("capital.csv"),
        "date,type,amount,note\n2024-01-02,Deposit,400000.0,\n",
    )
    .unwrap();

    let result = invctl::run_command(
        invctl::AppCommand::Performance { loan: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Performance command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_rules_edits_replace_the_table() {
    let mock_server = wiremock::MockServer::start().await;
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(dir.path(), &mock_server.uri(), "VIX", 0.0);
    let config = config_path.to_str().unwrap();

    let result = invctl::run_command(
        invctl::AppCommand::Rules(invctl::RulesCommand::Add {
            threshold: 50.0,
            action: "Deploy the remaining reserve".to_string(),
        }),
        Some(config),
    )
    .await;
    assert!(result.is_ok(), "Rule add failed: {:?}", result.err());

    let rules_csv = fs::read_to_string(dir.path().join("data").join("rules.csv")).unwrap();
    // three seeded rules plus the new one
    assert_eq!(rules_csv.lines().count(), 5);
    assert!(rules_csv.contains("Deploy the remaining reserve"));

    let result = invctl::run_command(
        invctl::AppCommand::Rules(invctl::RulesCommand::Remove { index: 1 }),
        Some(config),
    )
    .await;
    assert!(result.is_ok(), "Rule remove failed: {:?}", result.err());

    let rules_csv = fs::read_to_string(dir.path().join("data").join("rules.csv")).unwrap();
    assert_eq!(rules_csv.lines().count(), 4);
}
