//! # Paysera Checkout
//!
//! Builds the signed redirect to the Paysera payment page.
//! This is the only way a customer reaches the gateway: there is no
//! server-to-server call.

use crate::config::PayseraConfig;
use crate::params::PaymentParameters;
use crate::{callback, codec, signer};
use pay_core::{
    CallbackResult, CheckoutRequest, CheckoutSession, OrderId, OrderIdSequencer, PaymentGateway,
    PaymentResult, RejectReason, ValidatedCheckout,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Paysera redirect gateway
pub struct PayseraGateway {
    config: PayseraConfig,
    sequencer: Arc<OrderIdSequencer>,
}

impl PayseraGateway {
    /// Create a gateway with an injected order id sequencer
    pub fn new(config: PayseraConfig, sequencer: Arc<OrderIdSequencer>) -> Self {
        Self { config, sequencer }
    }

    /// Create from environment variables, with a sequencer using the
    /// configured order prefix
    pub fn from_env() -> Self {
        let config = PayseraConfig::from_env();
        let sequencer = Arc::new(OrderIdSequencer::new(config.settings.order_prefix.clone()));
        Self::new(config, sequencer)
    }

    /// Assemble the gateway parameter set for a validated checkout
    fn build_parameters(
        &self,
        project_id: &str,
        order_id: &OrderId,
        checkout: &ValidatedCheckout<'_>,
    ) -> PaymentParameters {
        let settings = &self.config.settings;
        let urls = &self.config.urls;

        PaymentParameters::new()
            .with("projectid", project_id)
            .with("orderid", order_id.as_str())
            .with("accepturl", urls.accept_url())
            .with("cancelurl", urls.cancel_url())
            .with("callbackurl", urls.callback_url())
            .with("amount", checkout.amount_cents)
            .with("currency", settings.currency.as_str())
            .with("country", settings.country.as_str())
            .with(
                "lang",
                checkout.locale.unwrap_or(settings.default_locale.as_str()),
            )
            .with("p_email", checkout.email)
            .with("paytext", settings.paytext.as_str())
            .with("test", self.config.environment.test_flag())
            // always present, the gateway expects the fields even when empty
            .with("p_firstname", checkout.payer.name_or_empty())
            .with("p_phone", checkout.payer.phone_or_empty())
    }
}

impl PaymentGateway for PayseraGateway {
    fn ensure_configured(&self) -> PaymentResult<()> {
        self.config.credentials().map(|_| ())
    }

    #[instrument(skip(self, request), fields(env = %self.config.environment))]
    fn initiate(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession> {
        // credentials first, before looking at the request body
        let credentials = self.config.credentials().map_err(|e| {
            error!("Checkout refused: {}", e);
            e
        })?;

        let checkout = request.validate()?;

        let order_id = match checkout.order_id {
            Some(id) => OrderId::new(id),
            None => self.sequencer.next(),
        };

        let params = self.build_parameters(credentials.project_id, &order_id, &checkout);
        let data = codec::encode(&params);
        let sign = signer::sign(&data, credentials.sign_password);

        debug!("Encoded {} gateway params", params.len());

        let pay_url = format!(
            "{}?data={}&sign={}",
            self.config.pay_url(),
            urlencoding::encode(&data),
            sign
        );

        info!(
            "Created checkout: order={}, amount={}",
            order_id, checkout.amount_cents
        );

        Ok(CheckoutSession { pay_url, order_id })
    }

    #[instrument(skip_all)]
    fn verify_callback(&self, data: &str, signature: &str) -> CallbackResult {
        match self.config.credentials() {
            Ok(credentials) => callback::verify(credentials.sign_password, data, signature),
            Err(e) => {
                error!("Callback refused: {}", e);
                CallbackResult::Rejected(RejectReason::NotConfigured)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "paysera"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayEnvironment, PRODUCTION_PAY_URL, SANDBOX_PAY_URL};
    use pay_core::{Payer, PaymentError};
    use std::collections::HashMap;

    fn gateway() -> PayseraGateway {
        let config = PayseraConfig::new("12345", "test-password", "https://shop.example.lt");
        PayseraGateway::new(config, Arc::new(OrderIdSequencer::default()))
    }

    /// Split a pay URL into its `data` and `sign` query values
    fn query_of(pay_url: &str) -> HashMap<String, String> {
        let (_, query) = pay_url.split_once('?').unwrap();
        form_urlencoded::parse(query.as_bytes()).into_owned().collect()
    }

    #[test]
    fn test_initiate_end_to_end() {
        let gateway = gateway();
        let request = CheckoutRequest::new(1299, "a@b.lt").with_locale("lt");

        let session = gateway.initiate(&request).unwrap();
        assert!(session.pay_url.starts_with(SANDBOX_PAY_URL));
        assert!(session.pay_url.contains("data="));
        assert!(session.pay_url.contains("sign="));

        let query = query_of(&session.pay_url);
        let result = gateway.verify_callback(&query["data"], &query["sign"]);

        let callback = result.verified().unwrap();
        assert_eq!(callback.get("amount"), Some("1299"));
        assert_eq!(callback.order_id(), Some(session.order_id.as_str()));
    }

    #[test]
    fn test_parameters_on_the_wire() {
        let gateway = gateway();
        let request = CheckoutRequest::new(500, "a@b.lt").with_order_id("CUSTOM-1");

        let session = gateway.initiate(&request).unwrap();
        assert_eq!(session.order_id.as_str(), "CUSTOM-1");

        let params = codec::decode(&query_of(&session.pay_url)["data"]).unwrap();
        assert_eq!(params["projectid"], "12345");
        assert_eq!(params["orderid"], "CUSTOM-1");
        assert_eq!(params["accepturl"], "https://shop.example.lt/payment/accept");
        assert_eq!(params["cancelurl"], "https://shop.example.lt/payment/cancel");
        assert_eq!(params["callbackurl"], "https://shop.example.lt/payment/callback");
        assert_eq!(params["currency"], "EUR");
        assert_eq!(params["country"], "LT");
        assert_eq!(params["lang"], "lt");
        assert_eq!(params["p_email"], "a@b.lt");
        assert_eq!(params["test"], "1");
        assert_eq!(params["p_firstname"], "");
        assert_eq!(params["p_phone"], "");
        assert!(params["paytext"].contains("Infinity Cube"));
    }

    #[test]
    fn test_payer_fields_forwarded() {
        let gateway = gateway();
        let request = CheckoutRequest::new(500, "a@b.lt").with_payer(Payer {
            name: Some("Ona".into()),
            phone: Some("+37060000000".into()),
        });

        let session = gateway.initiate(&request).unwrap();
        let params = codec::decode(&query_of(&session.pay_url)["data"]).unwrap();

        assert_eq!(params["p_firstname"], "Ona");
        assert_eq!(params["p_phone"], "+37060000000");
    }

    #[test]
    fn test_generated_order_ids_increment() {
        let gateway = gateway();
        let request = CheckoutRequest::new(100, "a@b.lt");

        let first = gateway.initiate(&request).unwrap().order_id;
        let second = gateway.initiate(&request).unwrap().order_id;

        assert!(first.as_str().starts_with("CUBE-"));
        assert!(first.as_str().ends_with("-001"));
        assert!(second.as_str().ends_with("-002"));
    }

    #[test]
    fn test_production_environment() {
        let config = PayseraConfig::new("12345", "pw", "https://shop.example.lt")
            .with_environment(GatewayEnvironment::Production);
        let gateway = PayseraGateway::new(config, Arc::new(OrderIdSequencer::default()));

        let session = gateway
            .initiate(&CheckoutRequest::new(100, "a@b.lt"))
            .unwrap();
        assert!(session.pay_url.starts_with(PRODUCTION_PAY_URL));

        let params = codec::decode(&query_of(&session.pay_url)["data"]).unwrap();
        assert_eq!(params["test"], "0");
    }

    #[test]
    fn test_configuration_checked_before_validation() {
        let mut config = PayseraConfig::new("12345", "pw", "https://shop.example.lt");
        config.project_id = None;
        let gateway = PayseraGateway::new(config, Arc::new(OrderIdSequencer::default()));

        assert!(gateway.ensure_configured().is_err());
        let err = gateway.initiate(&CheckoutRequest::default()).unwrap_err();
        assert!(matches!(err, PaymentError::Configuration(_)));

        assert_eq!(
            gateway.verify_callback("data", "sig"),
            CallbackResult::Rejected(RejectReason::NotConfigured)
        );
    }

    #[test]
    fn test_validation_error() {
        let err = gateway().initiate(&CheckoutRequest::default()).unwrap_err();
        assert!(matches!(err, PaymentError::Validation(_)));
    }
}
