use std::sync::Arc;

use crate::{
    clients::PeerServices,
    dto::pedido::{CreatePedidoRequest, ItemPedidoRequest, NovoPedido},
    error::{AppError, AppResult},
    models::{ItemPedido, Pedido},
    repository::PedidoRepository,
};

/// Order-creation workflow: resolve references against the peer services,
/// price the lines, persist. Fails before persisting anything.
pub struct PedidoService {
    repo: Arc<dyn PedidoRepository>,
    peers: Arc<dyn PeerServices>,
}

impl PedidoService {
    pub fn new(repo: Arc<dyn PedidoRepository>, peers: Arc<dyn PeerServices>) -> Self {
        Self { repo, peers }
    }

    pub async fn criar_pedido(&self, data: CreatePedidoRequest) -> AppResult<Pedido> {
        if let Some(cliente_id) = data.cliente.as_deref() {
            self.peers
                .get_cliente(cliente_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Cliente não encontrado".to_string()))?;
        }

        let (produtos, total) = self.calcular_total(data.produtos).await?;
        let pedido = self
            .repo
            .add_pedido(NovoPedido {
                cliente: data.cliente,
                produtos,
                total,
            })
            .await?;
        tracing::info!(pedido_id = %pedido.pedido_id, total = pedido.total, "novo pedido criado");
        Ok(pedido)
    }

    /// Resolves each line against the produto service, denormalizing name
    /// and price onto the line. Lookups are sequential and unbatched.
    async fn calcular_total(
        &self,
        itens: Vec<ItemPedidoRequest>,
    ) -> AppResult<(Vec<ItemPedido>, f64)> {
        let mut linhas = Vec::with_capacity(itens.len());
        let mut total = 0.0;
        for item in itens {
            let produto = self
                .peers
                .get_produto(&item.produto)
                .await?
                .ok_or_else(|| AppError::NotFound("Produto não encontrado".to_string()))?;

            let quantidade = item.quantidade.unwrap_or(1);
            if quantidade < 1 {
                return Err(AppError::BadRequest(
                    "Dados inválidos. Quantidade deve ser maior que zero".to_string(),
                ));
            }

            total += quantidade as f64 * produto.preco_produto;
            linhas.push(ItemPedido {
                produto: item.produto,
                nome_produto: produto.nome_produto,
                preco_produto: produto.preco_produto,
                quantidade,
            });
        }
        Ok((linhas, total))
    }
}
