pub mod cliente;
pub mod doc;
pub mod health;
pub mod pagamento;
pub mod pedido;
pub mod produto;
pub mod webhook;
