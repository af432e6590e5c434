use serde::Deserialize;

use super::Profile;
use crate::core::BunpoError;

const BASE_URL_ENV: &str = "BUNPO_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://bunpo100.app";

#[derive(Debug, Clone)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub display_price: &'static str,
    pub interval: &'static str,
    pub features: &'static [&'static str],
    pub checkout_link: &'static str,
    /// Checkout link without the trial period, shown to lapsed trials.
    pub checkout_link_direct: Option<&'static str>,
    pub is_featured: bool,
    pub badge: Option<&'static str>,
}

pub const PRICING_PLANS: &[Plan] = &[
    Plan {
        id: "amateur",
        name: "Amateur",
        description: "All 100 grammar structures, billed monthly.",
        display_price: "¥700",
        interval: "/month",
        features: &[
            "Full grammar catalog",
            "Progress tracking",
            "Example sentences with translations",
        ],
        checkout_link: "https://buy.stripe.com/7sIcPq2Hx9yE0pW000",
        checkout_link_direct: Some("https://buy.stripe.com/aEU7sA9nH2vQcGk289"),
        is_featured: false,
        badge: None,
    },
    Plan {
        id: "master",
        name: "Master",
        description: "Everything in Amateur, billed yearly.",
        display_price: "¥7,000",
        interval: "/year",
        features: &[
            "Full grammar catalog",
            "Progress tracking",
            "Example sentences with translations",
            "Two months free",
        ],
        checkout_link: "https://buy.stripe.com/5kA16q63f1mE5So145",
        checkout_link_direct: None,
        is_featured: true,
        badge: Some("Best value"),
    },
];

/// Picks the checkout target for a plan. Lapsed trials skip the trial
/// period on the monthly plan when a direct link exists.
pub fn checkout_url<'a>(plan: &'a Plan, profile: Option<&Profile>) -> &'a str {
    let expired_trial = profile.map_or(false, Profile::is_expired_trial);
    match plan.checkout_link_direct {
        Some(direct) if expired_trial && plan.id == "amateur" => direct,
        _ => plan.checkout_link,
    }
}

#[derive(Deserialize)]
struct PortalResponse {
    url: String,
}

fn base_url() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Asks the server for a billing-portal redirect URL for this customer.
/// The returned URL is an opaque redirect target.
pub fn create_portal_url(customer_id: &str) -> Result<String, BunpoError> {
    let endpoint = format!("{}/api/billing/create-portal", base_url());
    let body = serde_json::json!({ "customerId": customer_id });

    let response = reqwest::blocking::Client::new().post(&endpoint).json(&body).send()?;

    if !response.status().is_success() {
        let status = response.status();
        eprintln!("Portal request failed ({})", status);
        return Err(BunpoError::Custom(format!("Portal request failed ({})", status)));
    }

    let parsed: PortalResponse = response.json()?;
    Ok(parsed.url)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn profile(customer_id: Option<&str>, has_access: bool) -> Profile {
        Profile {
            id: Uuid::nil(),
            customer_id: customer_id.map(String::from),
            price_id: None,
            email: None,
            name: None,
            updated_at: None,
            has_access: Some(has_access),
        }
    }

    #[test]
    fn plans_are_well_formed() {
        assert_eq!(PRICING_PLANS.len(), 2);
        for plan in PRICING_PLANS {
            assert!(!plan.features.is_empty());
            assert!(plan.checkout_link.starts_with("https://"));
        }
    }

    #[test]
    fn expired_trial_gets_the_direct_monthly_link() {
        let amateur = &PRICING_PLANS[0];
        let lapsed = profile(Some("cus_123"), false);

        assert_eq!(checkout_url(amateur, Some(&lapsed)), amateur.checkout_link_direct.unwrap());
        assert_eq!(checkout_url(amateur, None), amateur.checkout_link);

        let active = profile(Some("cus_123"), true);
        assert_eq!(checkout_url(amateur, Some(&active)), amateur.checkout_link);
    }

    #[test]
    fn yearly_plan_never_redirects_to_a_direct_link() {
        let master = &PRICING_PLANS[1];
        let lapsed = profile(Some("cus_123"), false);
        assert_eq!(checkout_url(master, Some(&lapsed)), master.checkout_link);
    }
}
