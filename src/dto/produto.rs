use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// All fields optional so a malformed body still deserializes and gets the
/// Portuguese validation messages instead of a framework rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProdutoRequest {
    pub nome_produto: Option<String>,
    pub descricao_produto: Option<String>,
    pub preco_produto: Option<f64>,
    pub categoria_produto: Option<String>,
}

/// A product payload that survived validation; every field present.
#[derive(Debug, Clone)]
pub struct NovoProduto {
    pub nome_produto: String,
    pub descricao_produto: String,
    pub preco_produto: f64,
    pub categoria_produto: String,
}

impl CreateProdutoRequest {
    /// Field-by-field validation, accumulating every problem found.
    pub fn validate(self) -> Result<NovoProduto, Vec<String>> {
        let mut errors = Vec::new();
        if self.nome_produto.as_deref().is_none_or(str::is_empty) {
            errors.push("Nome do produto é obrigatório".to_string());
        }
        if self.descricao_produto.as_deref().is_none_or(str::is_empty) {
            errors.push("Descrição do produto é obrigatória".to_string());
        }
        if self.preco_produto.is_none_or(|preco| preco <= 0.0) {
            errors.push("Preço do produto deve ser maior que zero".to_string());
        }
        if self.categoria_produto.as_deref().is_none_or(str::is_empty) {
            errors.push("Categoria do produto é obrigatória".to_string());
        }
        match (
            self.nome_produto,
            self.descricao_produto,
            self.preco_produto,
            self.categoria_produto,
        ) {
            (Some(nome), Some(descricao), Some(preco), Some(categoria)) if errors.is_empty() => {
                Ok(NovoProduto {
                    nome_produto: nome,
                    descricao_produto: descricao,
                    preco_produto: preco,
                    categoria_produto: categoria,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProdutoRequest {
    pub nome_produto: Option<String>,
    pub descricao_produto: Option<String>,
    pub preco_produto: Option<f64>,
    pub categoria_produto: Option<String>,
}
