pub mod cliente;
pub mod pagamento;
pub mod pedido;
pub mod produto;
