use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/cliente`; every field optional, an empty body means
/// the caller wants to continue anonymously.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClienteRequest {
    pub cpf: Option<String>,
    pub nome_cliente: Option<String>,
    pub email: Option<String>,
}
