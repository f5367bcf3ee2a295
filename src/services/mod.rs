pub mod pagamento_service;
pub mod pedido_service;
