//! Wire types for the PagSeguro orders API, limited to the fields this
//! system actually sends and reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    pub reference_id: String,
    pub customer: GatewayCustomer,
    pub items: Vec<GatewayItem>,
    pub qr_codes: Vec<GatewayQrCodeRequest>,
    pub shipping: GatewayShipping,
    pub notification_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub phones: Vec<GatewayPhone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayPhone {
    pub country: String,
    pub area: String,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayItem {
    pub name: String,
    pub quantity: i64,
    /// Minor currency units (centavos).
    pub unit_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayQrCodeRequest {
    pub amount: GatewayAmount,
    pub expiration_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayAmount {
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayShipping {
    pub address: GatewayAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayAddress {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub locality: String,
    pub city: String,
    pub region_code: String,
    pub country: String,
    pub postal_code: String,
}

/// Subset of the gateway's response we read. Defaults keep a shape
/// mismatch from becoming a deserialization failure; the service turns a
/// missing link into a classified upstream error instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayOrderResponse {
    #[serde(default)]
    pub qr_codes: Vec<GatewayQrCode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayQrCode {
    #[serde(default)]
    pub links: Vec<GatewayLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayLink {
    pub href: String,
}
