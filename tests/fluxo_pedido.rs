//! Order creation, payment initiation and webhook processing exercised
//! end-to-end through the route handlers, with in-memory fakes standing in
//! for the store, the peer services and the PagSeguro gateway.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::json;
use tokio::sync::Mutex;

use pedidos_microservices::{
    clients::{PagamentoGateway, PeerServices},
    dto::pagamento::{GatewayLink, GatewayOrderRequest, GatewayOrderResponse, GatewayQrCode},
    dto::pedido::NovoPedido,
    error::{AppError, AppResult},
    models::{Cliente, Pagamento, Pedido, Produto},
    repository::{PedidoRepository, novo_id},
    routes::{
        pagamento::criar_pagamento,
        pedido::{atualizar_status, criar_pedido, listar_pedidos_ativos},
        webhook::receber_notificacao,
    },
    services::{
        pagamento_service::{PagamentoService, mapear_status_pagamento, montar_request_body},
        pedido_service::PedidoService,
    },
    state::PedidoState,
};

struct MemPedidoRepository {
    pedidos: Mutex<Vec<Pedido>>,
}

impl MemPedidoRepository {
    fn new() -> Self {
        Self {
            pedidos: Mutex::new(Vec::new()),
        }
    }

    async fn snapshot(&self) -> Vec<Pedido> {
        self.pedidos.lock().await.clone()
    }
}

#[async_trait]
impl PedidoRepository for MemPedidoRepository {
    async fn add_pedido(&self, data: NovoPedido) -> AppResult<Pedido> {
        let pedido = Pedido {
            pedido_id: novo_id(),
            cliente: data.cliente,
            produtos: data.produtos,
            total: data.total,
            status: "Recebido".to_string(),
            datapedido: Utc::now(),
            status_pagamento: "Pendente".to_string(),
            pagamento_id: None,
            prioridade: 0,
        };
        self.pedidos.lock().await.push(pedido.clone());
        Ok(pedido)
    }

    async fn get_pedido_by_pedido_id(&self, pedido_id: &str) -> AppResult<Option<Pedido>> {
        Ok(self
            .pedidos
            .lock()
            .await
            .iter()
            .find(|pedido| pedido.pedido_id == pedido_id)
            .cloned())
    }

    async fn get_all_pedidos(&self) -> AppResult<Vec<Pedido>> {
        Ok(self.snapshot().await)
    }

    async fn get_pedidos_ativos(&self) -> AppResult<Vec<Pedido>> {
        let mut ativos: Vec<Pedido> = self
            .pedidos
            .lock()
            .await
            .iter()
            .filter(|pedido| pedido.status != "Finalizado")
            .cloned()
            .collect();
        ativos.sort_by(|a, b| {
            a.datapedido
                .cmp(&b.datapedido)
                .then(a.prioridade.cmp(&b.prioridade))
        });
        Ok(ativos)
    }

    async fn update_pedido_status(
        &self,
        pedido_id: &str,
        novo_status: &str,
    ) -> AppResult<Option<Pedido>> {
        let mut pedidos = self.pedidos.lock().await;
        match pedidos.iter_mut().find(|p| p.pedido_id == pedido_id) {
            Some(pedido) => {
                pedido.status = novo_status.to_string();
                Ok(Some(pedido.clone()))
            }
            None => Ok(None),
        }
    }

    async fn update_status_pagamento(
        &self,
        pedido_id: &str,
        status_pagamento: &str,
    ) -> AppResult<Option<Pedido>> {
        let mut pedidos = self.pedidos.lock().await;
        match pedidos.iter_mut().find(|p| p.pedido_id == pedido_id) {
            Some(pedido) => {
                pedido.status_pagamento = status_pagamento.to_string();
                Ok(Some(pedido.clone()))
            }
            None => Ok(None),
        }
    }
}

struct MemPeerServices {
    clientes: HashMap<String, Cliente>,
    produtos: HashMap<String, Produto>,
}

#[async_trait]
impl PeerServices for MemPeerServices {
    async fn get_cliente(&self, cliente_id: &str) -> AppResult<Option<Cliente>> {
        Ok(self.clientes.get(cliente_id).cloned())
    }

    async fn get_produto(&self, produto_id: &str) -> AppResult<Option<Produto>> {
        Ok(self.produtos.get(produto_id).cloned())
    }
}

struct FakeGateway {
    response: GatewayOrderResponse,
    requests: Mutex<Vec<GatewayOrderRequest>>,
}

impl FakeGateway {
    fn with_links(hrefs: &[&str]) -> Self {
        Self {
            response: GatewayOrderResponse {
                qr_codes: vec![GatewayQrCode {
                    links: hrefs
                        .iter()
                        .map(|href| GatewayLink {
                            href: href.to_string(),
                        })
                        .collect(),
                }],
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    fn empty() -> Self {
        Self {
            response: GatewayOrderResponse::default(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PagamentoGateway for FakeGateway {
    async fn criar_pagamento(&self, body: &GatewayOrderRequest) -> AppResult<GatewayOrderResponse> {
        self.requests.lock().await.push(body.clone());
        Ok(self.response.clone())
    }
}

fn cliente_exemplo(id: &str) -> Cliente {
    Cliente {
        cliente_id: id.to_string(),
        cpf: Some("12345678900".to_string()),
        nome_cliente: Some("João".to_string()),
        email: Some("joao@example.com".to_string()),
        registrado: false,
        data_registro: Utc::now(),
    }
}

fn produto_exemplo(id: &str, nome: &str, preco: f64) -> Produto {
    Produto {
        produto_id: id.to_string(),
        nome_produto: nome.to_string(),
        descricao_produto: "d".to_string(),
        preco_produto: preco,
        categoria_produto: "c".to_string(),
    }
}

fn montar_state(
    repo: Arc<MemPedidoRepository>,
    peers: Arc<MemPeerServices>,
    gateway: Arc<dyn PagamentoGateway>,
) -> PedidoState {
    let repo_dyn: Arc<dyn PedidoRepository> = repo;
    let peers_dyn: Arc<dyn PeerServices> = peers;
    PedidoState {
        repo: repo_dyn.clone(),
        pedidos: Arc::new(PedidoService::new(repo_dyn.clone(), peers_dyn.clone())),
        pagamentos: Arc::new(PagamentoService::new(
            repo_dyn,
            peers_dyn,
            gateway,
            "https://meusite.com/notificacoes".to_string(),
        )),
    }
}

fn state_padrao(repo: Arc<MemPedidoRepository>) -> PedidoState {
    let peers = Arc::new(MemPeerServices {
        clientes: HashMap::from([("cli1".to_string(), cliente_exemplo("cli1"))]),
        produtos: HashMap::from([
            ("p1".to_string(), produto_exemplo("p1", "P1", 10.0)),
            ("p2".to_string(), produto_exemplo("p2", "P2", 3.5)),
        ]),
    });
    montar_state(
        repo,
        peers,
        Arc::new(FakeGateway::with_links(&[
            "https://pagseguro/self",
            "https://pagseguro/qr.png",
        ])),
    )
}

#[tokio::test]
async fn criar_pedido_calcula_total_e_denormaliza_linhas() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let body = json!({
        "cliente": "cli1",
        "produtos": [
            { "produto": "p1", "quantidade": 2 },
            { "produto": "p2" }
        ]
    });
    let (status, Json(pedido)) = criar_pedido(State(state), Json(body)).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pedido.total, 2.0 * 10.0 + 3.5);
    assert_eq!(pedido.status, "Recebido");
    assert_eq!(pedido.produtos.len(), 2);
    assert_eq!(pedido.produtos[0].nome_produto, "P1");
    assert_eq!(pedido.produtos[0].preco_produto, 10.0);
    // omitted quantidade defaults to 1
    assert_eq!(pedido.produtos[1].quantidade, 1);

    let persistidos = repo.snapshot().await;
    assert_eq!(persistidos.len(), 1);
    assert_eq!(persistidos[0].total, pedido.total);
    Ok(())
}

#[tokio::test]
async fn criar_pedido_rejeita_produtos_que_nao_sao_array() {
    let state = state_padrao(Arc::new(MemPedidoRepository::new()));

    let err = criar_pedido(State(state), Json(json!({ "produtos": "oops" })))
        .await
        .expect_err("string em produtos deve falhar");
    match err {
        AppError::BadRequest(msg) => {
            assert_eq!(msg, "Dados inválidos. Produtos é obrigatório e deve ser um array");
        }
        outro => panic!("esperado BadRequest, obtido {outro:?}"),
    }
}

#[tokio::test]
async fn criar_pedido_cliente_desconhecido_da_404_sem_persistir() {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let body = json!({ "cliente": "fantasma", "produtos": [{ "produto": "p1" }] });
    let err = criar_pedido(State(state), Json(body))
        .await
        .expect_err("cliente inexistente deve falhar");
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Cliente não encontrado"),
        outro => panic!("esperado NotFound, obtido {outro:?}"),
    }
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn criar_pedido_produto_desconhecido_da_404_sem_persistir() {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let body = json!({ "produtos": [{ "produto": "p1" }, { "produto": "nao-existe" }] });
    let err = criar_pedido(State(state), Json(body))
        .await
        .expect_err("produto inexistente deve falhar");
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Produto não encontrado"),
        outro => panic!("esperado NotFound, obtido {outro:?}"),
    }
    assert!(repo.snapshot().await.is_empty());
}

#[tokio::test]
async fn pedido_anonimo_dispensa_consulta_ao_cliente() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let body = json!({ "produtos": [{ "produto": "p1", "quantidade": 3 }] });
    let (status, Json(pedido)) = criar_pedido(State(state), Json(body)).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pedido.cliente, None);
    assert_eq!(pedido.total, 30.0);
    Ok(())
}

#[tokio::test]
async fn listagem_de_ativos_exclui_finalizados() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let (_, Json(aberto)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "produtos": [{ "produto": "p1" }] })),
    )
    .await?;
    let (_, Json(fechado)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "produtos": [{ "produto": "p2" }] })),
    )
    .await?;

    atualizar_status(
        State(state.clone()),
        Path(fechado.pedido_id.clone()),
        Json(serde_json::from_value(json!({ "novoStatus": "Finalizado" }))?),
    )
    .await?;

    let Json(ativos) = listar_pedidos_ativos(State(state)).await?;
    assert_eq!(ativos.len(), 1);
    assert_eq!(ativos[0].pedido_id, aberto.pedido_id);
    assert!(ativos.iter().all(|pedido| pedido.status != "Finalizado"));
    Ok(())
}

#[tokio::test]
async fn pagamento_para_pedido_inexistente_da_404() {
    let state = state_padrao(Arc::new(MemPedidoRepository::new()));

    let err = criar_pagamento(State(state), Path("nada".to_string()))
        .await
        .expect_err("pedido inexistente deve falhar");
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Pedido não encontrado"),
        outro => panic!("esperado NotFound, obtido {outro:?}"),
    }
}

#[tokio::test]
async fn pagamento_envia_centavos_e_extrai_segundo_link() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let peers = Arc::new(MemPeerServices {
        clientes: HashMap::from([("cli1".to_string(), cliente_exemplo("cli1"))]),
        produtos: HashMap::from([("p1".to_string(), produto_exemplo("p1", "P1", 10.0))]),
    });
    let gateway = Arc::new(FakeGateway::with_links(&[
        "https://pagseguro/self",
        "https://pagseguro/qr.png",
    ]));
    let state = montar_state(repo.clone(), peers, gateway.clone());

    let (_, Json(pedido)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "cliente": "cli1", "produtos": [{ "produto": "p1", "quantidade": 2 }] })),
    )
    .await?;

    let (status, Json(pagamento)): (StatusCode, Json<Pagamento>) =
        criar_pagamento(State(state), Path(pedido.pedido_id.clone())).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pagamento.pedido_id, pedido.pedido_id);
    assert_eq!(pagamento.valor, 20.0);
    // the caller sees Pendente while the store records Aprovado
    assert_eq!(pagamento.status, "Pendente");
    assert_eq!(pagamento.qr_code_link, "https://pagseguro/qr.png");

    let persistido = repo.snapshot().await.remove(0);
    assert_eq!(persistido.status_pagamento, "Aprovado");

    let requests = gateway.requests.lock().await;
    let enviado = &requests[0];
    assert_eq!(enviado.reference_id, pedido.pedido_id);
    assert_eq!(enviado.items[0].unit_amount, 1000);
    assert_eq!(enviado.items[0].quantity, 2);
    assert_eq!(enviado.qr_codes[0].amount.value, 2000);
    assert_eq!(enviado.customer.tax_id.as_deref(), Some("12345678900"));
    Ok(())
}

#[tokio::test]
async fn resposta_do_gateway_sem_links_vira_erro_upstream() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let peers = Arc::new(MemPeerServices {
        clientes: HashMap::from([("cli1".to_string(), cliente_exemplo("cli1"))]),
        produtos: HashMap::from([("p1".to_string(), produto_exemplo("p1", "P1", 10.0))]),
    });
    let state = montar_state(repo.clone(), peers, Arc::new(FakeGateway::empty()));

    let (_, Json(pedido)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "cliente": "cli1", "produtos": [{ "produto": "p1" }] })),
    )
    .await?;

    let err = criar_pagamento(State(state), Path(pedido.pedido_id.clone()))
        .await
        .expect_err("resposta sem links deve falhar");
    match err {
        AppError::Upstream { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Resposta inesperada do gateway de pagamento");
        }
        outro => panic!("esperado Upstream, obtido {outro:?}"),
    }
    // the fragile write never happened
    assert_eq!(repo.snapshot().await[0].status_pagamento, "Pendente");
    Ok(())
}

#[tokio::test]
async fn pagamento_de_pedido_anonimo_da_404_de_cliente() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let (_, Json(pedido)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "produtos": [{ "produto": "p1" }] })),
    )
    .await?;

    let err = criar_pagamento(State(state), Path(pedido.pedido_id))
        .await
        .expect_err("pedido sem cliente não pode ser pago");
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Cliente não encontrado"),
        outro => panic!("esperado NotFound, obtido {outro:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn webhook_paid_aprova_e_outros_status_ficam_verbatim() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let (_, Json(pedido)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "produtos": [{ "produto": "p1" }] })),
    )
    .await?;

    let resposta = receber_notificacao(
        State(state.clone()),
        Json(serde_json::from_value(json!({
            "event": "transaction",
            "data": { "reference_id": pedido.pedido_id, "status": "PAID" }
        }))?),
    )
    .await?;
    assert_eq!(resposta, "Notificação recebida");
    assert_eq!(repo.snapshot().await[0].status_pagamento, "Aprovado");

    receber_notificacao(
        State(state),
        Json(serde_json::from_value(json!({
            "event": "transaction",
            "data": { "reference_id": pedido.pedido_id, "status": "DECLINED" }
        }))?),
    )
    .await?;
    assert_eq!(repo.snapshot().await[0].status_pagamento, "DECLINED");
    Ok(())
}

#[tokio::test]
async fn webhook_para_pedido_desconhecido_ainda_responde_200() -> anyhow::Result<()> {
    let state = state_padrao(Arc::new(MemPedidoRepository::new()));

    let resposta = receber_notificacao(
        State(state),
        Json(serde_json::from_value(json!({
            "event": "transaction",
            "data": { "reference_id": "nao-existe", "status": "PAID" }
        }))?),
    )
    .await?;
    assert_eq!(resposta, "Notificação recebida");
    Ok(())
}

#[tokio::test]
async fn webhook_ignora_eventos_que_nao_sao_transacao() -> anyhow::Result<()> {
    let repo = Arc::new(MemPedidoRepository::new());
    let state = state_padrao(repo.clone());

    let (_, Json(pedido)) = criar_pedido(
        State(state.clone()),
        Json(json!({ "produtos": [{ "produto": "p1" }] })),
    )
    .await?;

    receber_notificacao(
        State(state),
        Json(serde_json::from_value(json!({
            "event": "chargeback",
            "data": { "reference_id": pedido.pedido_id, "status": "PAID" }
        }))?),
    )
    .await?;
    assert_eq!(repo.snapshot().await[0].status_pagamento, "Pendente");
    Ok(())
}

#[test]
fn mapeamento_de_status_do_gateway() {
    assert_eq!(mapear_status_pagamento("PAID"), "Aprovado");
    assert_eq!(mapear_status_pagamento("CANCELED"), "CANCELED");
}

#[test]
fn request_body_carrega_telefone_e_endereco_fixos() {
    let pedido = Pedido {
        pedido_id: "ped1".to_string(),
        cliente: Some("cli1".to_string()),
        produtos: Vec::new(),
        total: 12.34,
        status: "Recebido".to_string(),
        datapedido: Utc::now(),
        status_pagamento: "Pendente".to_string(),
        pagamento_id: None,
        prioridade: 0,
    };
    let body = montar_request_body(
        &pedido,
        &cliente_exemplo("cli1"),
        Vec::new(),
        "https://meusite.com/notificacoes",
    );

    assert_eq!(body.reference_id, "ped1");
    assert_eq!(body.qr_codes[0].amount.value, 1234);
    assert_eq!(body.customer.phones[0].number, "999999999");
    assert_eq!(body.shipping.address.city, "Curitiba");
    assert_eq!(body.notification_urls, vec!["https://meusite.com/notificacoes"]);
}
