use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedidoRequest {
    pub produto: String,
    /// Defaults to 1 when omitted.
    pub quantidade: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePedidoRequest {
    pub cliente: Option<String>,
    pub produtos: Vec<ItemPedidoRequest>,
}

/// A priced order ready for persistence; identifier and defaults are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NovoPedido {
    pub cliente: Option<String>,
    pub produtos: Vec<crate::models::ItemPedido>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub novo_status: Option<String>,
}

/// PagSeguro webhook notification. The gateway sends snake_case keys.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookNotification {
    pub event: Option<String>,
    pub data: Option<WebhookData>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookData {
    pub reference_id: Option<String>,
    pub status: Option<String>,
}
