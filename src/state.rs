use std::sync::Arc;

use crate::{
    repository::{ClienteRepository, PedidoRepository, ProdutoRepository},
    services::{pagamento_service::PagamentoService, pedido_service::PedidoService},
};

#[derive(Clone)]
pub struct ClienteState {
    pub repo: Arc<dyn ClienteRepository>,
}

#[derive(Clone)]
pub struct ProdutoState {
    pub repo: Arc<dyn ProdutoRepository>,
}

#[derive(Clone)]
pub struct PedidoState {
    pub repo: Arc<dyn PedidoRepository>,
    pub pedidos: Arc<PedidoService>,
    pub pagamentos: Arc<PagamentoService>,
}
