use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Subscription tiers sold on the site.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Standard,
    Premium,
}

impl Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            PlanId::Basic => "basic",
            PlanId::Standard => "standard",
            PlanId::Premium => "premium",
        };
        write!(f, "{}", id)
    }
}

impl PlanId {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(PlanId::Basic),
            "standard" => Some(PlanId::Standard),
            "premium" => Some(PlanId::Premium),
            _ => None,
        }
    }
}

/// A fixed tier compiled into the service. `code` is the purchase code handed out
/// by the account manager and must never leave the server.
#[derive(Debug, PartialEq, Eq)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub price: i32,
    pub original_price: Option<i32>,
    pub duration_months: u32,
    pub duration_label: &'static str,
    pub code: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

static PLANS: [Plan; 3] = [
    Plan {
        id: PlanId::Basic,
        name: "Basic Plan",
        price: 500,
        original_price: None,
        duration_months: 3,
        duration_label: "3 Months",
        code: "09TTUYH",
        features: &[
            "1-2 Daily Trade Signals",
            "98% Win Rate Accuracy",
            "1-Hour Advance Notifications",
            "Email Delivery",
            "Basic Support",
            "Entry & Exit Points",
        ],
        popular: false,
    },
    Plan {
        id: PlanId::Standard,
        name: "Standard Plan",
        price: 700,
        original_price: Some(800),
        duration_months: 6,
        duration_label: "6 Months",
        code: "90HHUKO",
        features: &[
            "1-2 Daily Trade Signals",
            "98% Win Rate Accuracy",
            "1-Hour Advance Notifications",
            "Email & SMS Delivery",
            "Priority Support",
            "Entry & Exit Points",
            "Risk Management Tips",
            "Weekly Market Analysis",
        ],
        popular: true,
    },
    Plan {
        id: PlanId::Premium,
        name: "Premium Plan",
        price: 1000,
        original_price: None,
        duration_months: 12,
        duration_label: "12 Months",
        code: "R6HUIPO",
        features: &[
            "1-2 Daily Trade Signals",
            "98% Win Rate Accuracy",
            "1-Hour Advance Notifications",
            "Email, SMS & Telegram",
            "24/7 VIP Support",
            "Entry & Exit Points",
            "Risk Management Tips",
            "Weekly Market Analysis",
            "Exclusive Trading Webinars",
            "1-on-1 Strategy Sessions",
        ],
        popular: false,
    },
];

/// All plans in display order.
pub fn plans() -> &'static [Plan] {
    &PLANS
}

/// Trims surrounding whitespace and upper-cases, the form every code is compared in.
pub fn normalize_purchase_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl Plan {
    pub fn find(id: PlanId) -> &'static Plan {
        match id {
            PlanId::Basic => &PLANS[0],
            PlanId::Standard => &PLANS[1],
            PlanId::Premium => &PLANS[2],
        }
    }

    pub fn accepts_code(&self, entered: &str) -> bool {
        normalize_purchase_code(entered) == self.code
    }
}

/// Public projection of a plan. Never carries the purchase code.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanDto {
    pub id: PlanId,
    pub name: String,
    pub price: i32,
    pub original_price: Option<i32>,
    pub duration_months: u32,
    pub duration_label: String,
    pub features: Vec<String>,
    pub popular: bool,
}

impl From<&Plan> for PlanDto {
    fn from(value: &Plan) -> Self {
        Self {
            id: value.id,
            name: value.name.to_string(),
            price: value.price,
            original_price: value.original_price,
            duration_months: value.duration_months,
            duration_label: value.duration_label.to_string(),
            features: value.features.iter().map(|f| f.to_string()).collect(),
            popular: value.popular,
        }
    }
}
