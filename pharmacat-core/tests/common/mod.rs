//! Shared helpers for integration tests

use pharmacat_core::CatalogConfig;
use std::path::Path;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Write `content` as medicines.json under `dir` and point a config at it
pub fn write_catalog(dir: &Path, content: &str) -> CatalogConfig {
    let path = dir.join("medicines.json");
    std::fs::write(&path, content).expect("write catalog fixture");
    CatalogConfig::with_source(path)
}

/// A document shaped like the storefront's: several containers, mixed
/// nesting, per-language fields and both facets
pub const STOREFRONT: &str = r#"{
    "medicine_groups": {
        "pain": {
            "name_en": "Pain Relief",
            "name_fa": "مسکن",
            "variants": {
                "asp1": {"name_en": "Aspirin", "name_fa": "آسپرین", "price": "10"},
                "asp2": {"name_en": "aspirin forte", "price": "12.5 USD", "exp": "2027-01"}
            }
        },
        "vitamins": {
            "name_en": "Vitamins",
            "variants": {"vitc": {"name_en": "Vitamin C", "PRICE": 3}}
        }
    },
    "faroxy_groups": {
        "faroxy": {
            "name_en": "Faroxy",
            "faroxys": {
                "strong": {"fx20": {"name_en": "Faroxy 20", "price_usd": "20$"}},
                "fx10": {"name_en": "Faroxy 10", "price_usd": "10$"}
            }
        }
    },
    "tramadol_groups": {
        "tramadol": {
            "name_tr": "Tramadol TR",
            "tramadols": {
                "t50": {"name_en": "Tramadol 50", "usd": "8", "about_en": "Opioid pain reliever"}
            }
        },
        "discontinued": {"name_en": "Discontinued"}
    },
    "medicine_images": {"asp1": "images/asp1.jpg", "fx10": "images/fx10.jpg"},
    "translations": {
        "pharmacy_online": {"en": "Online Pharmacy", "fa": "داروخانه آنلاین"}
    }
}"#;
