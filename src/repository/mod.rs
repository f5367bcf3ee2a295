use uuid::Uuid;

pub mod cliente;
pub mod pedido;
pub mod produto;

pub use cliente::{ClienteRepository, OrmClienteRepository};
pub use pedido::{OrmPedidoRepository, PedidoRepository};
pub use produto::{OrmProdutoRepository, ProdutoRepository};

/// Opaque short code assigned to every entity at insert time.
pub fn novo_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..10].to_string()
}
