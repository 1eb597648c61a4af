//! Checkout state machine
//!
//! ```text
//! CollectingDetails ─validate─▶ AwaitingPaymentAuthorization ─confirm─▶ SubmittingOrder ─▶ Completed
//!        ▲                              │                                    │
//!        └──────── reset_for_retry ─── Failed { message } ◀──────────────────┘
//! ```

use lakay_client::{HttpClient, NetworkHttpClient, StorefrontApi};
use shared::{CateringDetails, OrderDetails, OrderRequest, OrderType, PaymentIntentRequest};

use super::form::{ValidatedOrder, validate_catering, validate_regular};
use crate::cart::CartStore;
use crate::error::{FieldErrors, ShopError, ShopResult};
use crate::payment::{PaymentConfirmer, StripeConfirmer};
use crate::session::SessionProvider;
use crate::views::ViewScope;

const EMPTY_CART: &str = "Your cart is empty. Please add items before submitting an order.";
const REGULAR_SUBMITTED: &str = "Order submitted successfully!";
const CATERING_SUBMITTED: &str = "Catering inquiry submitted successfully!";
const PAYMENT_SETUP_FAILED: &str = "Failed to start payment. Please try again.";
const PAYMENT_FAILED: &str = "Payment could not be processed. Please try again.";
const SUBMIT_FAILED: &str = "Failed to submit order. Please try again.";

/// Payment confirmed by the provider but not yet attached to an accepted order
#[derive(Debug, Clone, PartialEq, Eq)]
struct AuthorizedPayment {
    payment_intent_id: String,
    amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    CollectingDetails,
    AwaitingPaymentAuthorization,
    SubmittingOrder,
    Completed,
    Failed {
        message: String,
    },
}

impl CheckoutState {
    /// User-visible failure text
    pub fn failure(&self) -> Option<&str> {
        match self {
            CheckoutState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Checkout for the current cart, regular or catering depending on the cart's order type
pub struct Checkout<H = NetworkHttpClient, P = StripeConfirmer> {
    api: StorefrontApi<H>,
    cart: CartStore,
    session: SessionProvider,
    confirmer: P,
    currency: String,
    scope: ViewScope,
    state: CheckoutState,
    regular: OrderDetails,
    catering: CateringDetails,
    authorized: Option<AuthorizedPayment>,
}

impl<H: HttpClient, P: PaymentConfirmer> Checkout<H, P> {
    pub fn new(
        api: StorefrontApi<H>,
        cart: CartStore,
        session: SessionProvider,
        confirmer: P,
        currency: impl Into<String>,
        scope: ViewScope,
    ) -> Self {
        Self {
            api,
            cart,
            session,
            confirmer,
            currency: currency.into(),
            scope,
            state: CheckoutState::default(),
            regular: OrderDetails::default(),
            catering: CateringDetails::default(),
            authorized: None,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Form in use, following the cart's order type
    pub fn order_type(&self) -> OrderType {
        self.cart.order_type()
    }

    pub fn regular_form(&self) -> &OrderDetails {
        &self.regular
    }

    pub fn regular_form_mut(&mut self) -> &mut OrderDetails {
        &mut self.regular
    }

    pub fn catering_form(&self) -> &CateringDetails {
        &self.catering
    }

    pub fn catering_form_mut(&mut self) -> &mut CateringDetails {
        &mut self.catering
    }

    /// Check the cart and the active form without touching the network
    pub fn validate(&self) -> ShopResult<ValidatedOrder> {
        if self.cart.is_empty() {
            let mut errors = FieldErrors::new();
            errors.add("cart", EMPTY_CART);
            return Err(ShopError::Validation(errors));
        }
        match self.order_type() {
            OrderType::Regular => validate_regular(&self.regular),
            OrderType::Catering => validate_catering(&self.catering),
        }
    }

    /// Run the whole checkout and return the acknowledgment text
    ///
    /// Validation failures leave the state at `CollectingDetails` and send
    /// nothing. Payment and backend failures move to `Failed` with the cart
    /// and form untouched. A payment confirmed for the same amount by an
    /// earlier attempt is reused instead of confirmed again. On success the
    /// cart is cleared, the active form is reset and the state is `Completed`.
    pub async fn submit(&mut self) -> ShopResult<String> {
        self.state = CheckoutState::CollectingDetails;
        let order = self.validate()?;

        let totals = self.cart.totals();
        let amount = match totals.amount_minor_units() {
            Ok(amount) => amount,
            Err(e) => return Err(self.fail(e.into(), PAYMENT_SETUP_FAILED)),
        };
        let session_id = self.session.session_id().to_string();

        let reusable = self
            .authorized
            .as_ref()
            .filter(|auth| auth.amount == amount)
            .map(|auth| auth.payment_intent_id.clone());
        let payment_intent_id = match reusable {
            Some(id) => {
                tracing::info!(
                    session_id = %session_id,
                    payment_intent = %id,
                    "Reusing confirmed payment"
                );
                id
            }
            None => self.authorize(&order, amount, &session_id).await?,
        };

        self.state = CheckoutState::SubmittingOrder;
        let (request, acknowledgment) = match &order {
            ValidatedOrder::Regular(details) => (
                OrderRequest::regular(details, totals.total_price, payment_intent_id),
                REGULAR_SUBMITTED,
            ),
            ValidatedOrder::Catering { details, guests } => (
                OrderRequest::catering(
                    details,
                    *guests,
                    totals.total_price,
                    payment_intent_id,
                ),
                CATERING_SUBMITTED,
            ),
        };
        let result = self
            .scope
            .run(self.api.submit_order(&session_id, &request))
            .await;
        if let Err(e) = result {
            return Err(self.fail(e, SUBMIT_FAILED));
        }

        self.authorized = None;
        self.cart.clear();
        match order {
            ValidatedOrder::Regular(_) => self.regular = OrderDetails::default(),
            ValidatedOrder::Catering { .. } => self.catering = CateringDetails::default(),
        }
        self.state = CheckoutState::Completed;
        tracing::info!(session_id = %session_id, order_type = %request.order_type, "Order submitted");
        Ok(acknowledgment.to_string())
    }

    /// Create a payment intent for `amount` and have the provider confirm it
    ///
    /// The confirmed intent is kept until an order is accepted, so a retry
    /// after a rejected submission does not charge the customer again.
    async fn authorize(
        &mut self,
        order: &ValidatedOrder,
        amount: i64,
        session_id: &str,
    ) -> ShopResult<String> {
        self.authorized = None;
        self.state = CheckoutState::AwaitingPaymentAuthorization;
        let intent_request = PaymentIntentRequest {
            amount,
            currency: self.currency.clone(),
            session_id: session_id.to_string(),
        };
        let result = self
            .scope
            .run(self.api.create_payment_intent(&intent_request))
            .await;
        let intent = match result {
            Ok(intent) => intent,
            Err(e) => return Err(self.fail(e, PAYMENT_SETUP_FAILED)),
        };

        let billing = order.billing();
        let result = self
            .scope
            .run(self.confirmer.confirm(&intent.client_secret, &billing))
            .await;
        let confirmation = match result {
            Ok(confirmation) => confirmation,
            Err(e) => return Err(self.fail(e, PAYMENT_FAILED)),
        };
        tracing::info!(
            session_id,
            payment_intent = %confirmation.payment_intent_id,
            amount,
            "Payment authorized"
        );
        self.authorized = Some(AuthorizedPayment {
            payment_intent_id: confirmation.payment_intent_id.clone(),
            amount,
        });
        Ok(confirmation.payment_intent_id)
    }

    /// Back to `CollectingDetails` after a failure, keeping the form as typed
    pub fn reset_for_retry(&mut self) {
        if matches!(self.state, CheckoutState::Failed { .. }) {
            self.state = CheckoutState::CollectingDetails;
        }
    }

    fn fail(&mut self, err: ShopError, fallback: &str) -> ShopError {
        if err.is_cancelled() {
            self.state = CheckoutState::CollectingDetails;
        } else {
            let message = err.user_message(fallback);
            tracing::error!(session_id = %self.session, error = %err, "Checkout failed");
            self.state = CheckoutState::Failed { message };
        }
        err
    }

    /// Cancel any in-flight request
    pub fn teardown(&self) {
        self.scope.cancel();
    }
}

impl<H, P> Drop for Checkout<H, P> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
