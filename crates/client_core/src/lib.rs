use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode as HttpStatus};
use serde::de::DeserializeOwned;
use shared::{
    domain::{OrderId, StatusCode},
    error::ProblemDetails,
    protocol::{CreateOrderRequest, Order},
};
use tracing::{debug, error, info};

pub mod error;

pub use error::{GatewayError, GatewayResult};

const ORDERS_PATH: &str = "/api/orders";

/// Every outbound call to the order API goes through this trait. Each call is
/// a single round trip: no retries, no caching.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn list_orders(&self) -> GatewayResult<Vec<Order>>;
    async fn get_order(&self, id: OrderId) -> GatewayResult<Order>;
    /// The returned order is the server's canonical copy, including assigned
    /// id, order number, date, subtotals and total.
    async fn create_order(&self, draft: &CreateOrderRequest) -> GatewayResult<Order>;
    async fn update_order_status(&self, id: OrderId, status: StatusCode) -> GatewayResult<()>;
    async fn delete_order(&self, id: OrderId) -> GatewayResult<()>;
}

pub struct HttpOrderGateway {
    http: Client,
    orders_url: String,
}

impl HttpOrderGateway {
    pub fn new(api_base_url: &str) -> Self {
        Self::with_client(Client::new(), api_base_url)
    }

    pub fn with_client(http: Client, api_base_url: &str) -> Self {
        Self {
            http,
            orders_url: format!("{}{ORDERS_PATH}", api_base_url.trim_end_matches('/')),
        }
    }

    pub fn orders_url(&self) -> &str {
        &self.orders_url
    }

    fn order_url(&self, id: OrderId) -> String {
        format!("{}/{}", self.orders_url, id.0)
    }

    async fn fetch_orders(&self) -> GatewayResult<Vec<Order>> {
        let response = self
            .http
            .get(&self.orders_url)
            .send()
            .await
            .map_err(GatewayError::Network)?;
        let response = check_status(response, || "order list".to_string()).await?;
        decode_json(response).await
    }

    async fn fetch_order(&self, id: OrderId) -> GatewayResult<Order> {
        let response = self
            .http
            .get(self.order_url(id))
            .send()
            .await
            .map_err(GatewayError::Network)?;
        let response = check_status(response, || format!("order {id}")).await?;
        decode_json(response).await
    }

    async fn post_order(&self, draft: &CreateOrderRequest) -> GatewayResult<Order> {
        let response = self
            .http
            .post(&self.orders_url)
            .json(draft)
            .send()
            .await
            .map_err(GatewayError::Network)?;
        let response = check_status(response, || "order".to_string()).await?;
        decode_json(response).await
    }

    async fn put_status(&self, id: OrderId, status: StatusCode) -> GatewayResult<()> {
        // The endpoint takes the bare integer, not an object wrapping it.
        let response = self
            .http
            .put(format!("{}/status", self.order_url(id)))
            .json(&status.0)
            .send()
            .await
            .map_err(GatewayError::Network)?;
        check_status(response, || format!("order {id}")).await?;
        Ok(())
    }

    async fn send_delete(&self, id: OrderId) -> GatewayResult<()> {
        let response = self
            .http
            .delete(self.order_url(id))
            .send()
            .await
            .map_err(GatewayError::Network)?;
        check_status(response, || format!("order {id}")).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn list_orders(&self) -> GatewayResult<Vec<Order>> {
        let result = self.fetch_orders().await;
        match &result {
            Ok(orders) => debug!(count = orders.len(), "fetched orders"),
            Err(err) => error!(error = %err, "error fetching orders"),
        }
        result
    }

    async fn get_order(&self, id: OrderId) -> GatewayResult<Order> {
        let result = self.fetch_order(id).await;
        if let Err(err) = &result {
            error!(order_id = id.0, error = %err, "error fetching order");
        }
        result
    }

    async fn create_order(&self, draft: &CreateOrderRequest) -> GatewayResult<Order> {
        let result = self.post_order(draft).await;
        match &result {
            Ok(order) => info!(
                order_id = order.id.0,
                order_number = %order.order_number,
                items = order.order_items.len(),
                "order created"
            ),
            Err(err) => error!(error = %err, "error creating order"),
        }
        result
    }

    async fn update_order_status(&self, id: OrderId, status: StatusCode) -> GatewayResult<()> {
        let result = self.put_status(id, status).await;
        match &result {
            Ok(()) => info!(order_id = id.0, status = status.0, "order status updated"),
            Err(err) => error!(
                order_id = id.0,
                status = status.0,
                error = %err,
                "error updating order status"
            ),
        }
        result
    }

    async fn delete_order(&self, id: OrderId) -> GatewayResult<()> {
        let result = self.send_delete(id).await;
        match &result {
            Ok(()) => info!(order_id = id.0, "order deleted"),
            Err(err) => error!(order_id = id.0, error = %err, "error deleting order"),
        }
        result
    }
}

async fn check_status(
    response: Response,
    resource: impl FnOnce() -> String,
) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == HttpStatus::NOT_FOUND {
        return Err(GatewayError::NotFound {
            resource: resource(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ProblemDetails>(&body)
        .ok()
        .and_then(|problem| problem.summary())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            }
        });

    if status == HttpStatus::BAD_REQUEST || status == HttpStatus::UNPROCESSABLE_ENTITY {
        Err(GatewayError::Validation { message })
    } else {
        Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(GatewayError::Network)?;
    serde_json::from_slice(&bytes).map_err(|err| GatewayError::Server {
        status,
        message: format!("malformed response body: {err}"),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
