pub mod clientes;
pub mod pedidos;
pub mod produtos;

pub use clientes::Entity as Clientes;
pub use pedidos::Entity as Pedidos;
pub use produtos::Entity as Produtos;
