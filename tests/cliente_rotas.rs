//! Customer registration semantics: lookup-before-create by CPF, the
//! anonymous path, and 404s for unknown ids.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tokio::sync::Mutex;

use pedidos_microservices::{
    dto::cliente::CreateClienteRequest,
    error::{AppError, AppResult},
    models::Cliente,
    repository::{ClienteRepository, novo_id},
    routes::cliente::{buscar_cliente, listar_clientes, registrar_cliente},
    state::ClienteState,
};

struct MemClienteRepository {
    clientes: Mutex<Vec<Cliente>>,
}

impl MemClienteRepository {
    fn new() -> Self {
        Self {
            clientes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ClienteRepository for MemClienteRepository {
    async fn add_cliente(&self, data: CreateClienteRequest) -> AppResult<Cliente> {
        let cliente = Cliente {
            cliente_id: novo_id(),
            cpf: data.cpf,
            nome_cliente: data.nome_cliente,
            email: data.email,
            registrado: false,
            data_registro: Utc::now(),
        };
        self.clientes.lock().await.push(cliente.clone());
        Ok(cliente)
    }

    async fn get_cliente_by_cliente_id(&self, cliente_id: &str) -> AppResult<Option<Cliente>> {
        Ok(self
            .clientes
            .lock()
            .await
            .iter()
            .find(|cliente| cliente.cliente_id == cliente_id)
            .cloned())
    }

    async fn find_cliente_by_cpf(&self, cpf: &str) -> AppResult<Option<Cliente>> {
        Ok(self
            .clientes
            .lock()
            .await
            .iter()
            .find(|cliente| cliente.cpf.as_deref() == Some(cpf))
            .cloned())
    }

    async fn get_all_clientes(&self) -> AppResult<Vec<Cliente>> {
        Ok(self.clientes.lock().await.clone())
    }
}

fn novo_state() -> ClienteState {
    ClienteState {
        repo: Arc::new(MemClienteRepository::new()),
    }
}

fn pedido_de_registro(cpf: &str) -> CreateClienteRequest {
    CreateClienteRequest {
        cpf: Some(cpf.to_string()),
        nome_cliente: Some("Maria".to_string()),
        email: Some("maria@example.com".to_string()),
    }
}

#[tokio::test]
async fn registro_novo_da_201_com_id_gerado() -> anyhow::Result<()> {
    let state = novo_state();

    let (status, Json(corpo)) =
        registrar_cliente(State(state), Json(pedido_de_registro("111"))).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(corpo["cpf"], "111");
    assert!(!corpo["clienteId"].as_str().unwrap_or_default().is_empty());
    assert_eq!(corpo["registrado"], false);
    Ok(())
}

#[tokio::test]
async fn cpf_ja_registrado_da_200_com_o_cadastro_existente() -> anyhow::Result<()> {
    let state = novo_state();
    registrar_cliente(State(state.clone()), Json(pedido_de_registro("111"))).await?;

    let (status, Json(corpo)) =
        registrar_cliente(State(state), Json(pedido_de_registro("111"))).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(corpo["message"], "Cliente já registrado.");
    assert_eq!(corpo["cliente"]["cpf"], "111");
    Ok(())
}

#[tokio::test]
async fn corpo_vazio_segue_como_anonimo_sem_persistir() -> anyhow::Result<()> {
    let state = novo_state();

    let (status, Json(corpo)) = registrar_cliente(
        State(state.clone()),
        Json(CreateClienteRequest {
            cpf: None,
            nome_cliente: None,
            email: None,
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(corpo["message"], "Continuando como anônimo.");
    assert!(state.repo.get_all_clientes().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn buscar_desconhecido_da_404() {
    let state = novo_state();

    let err = buscar_cliente(State(state.clone()), Path("nada".to_string()))
        .await
        .expect_err("id desconhecido");
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Cliente não encontrado."));

    let err = listar_clientes(State(state))
        .await
        .expect_err("base vazia");
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Nenhum cliente encontrado."));
}

#[tokio::test]
async fn corpo_json_usa_chaves_camel_case() -> anyhow::Result<()> {
    let state = novo_state();
    let (_, Json(corpo)) = registrar_cliente(State(state), Json(pedido_de_registro("222"))).await?;

    for chave in ["clienteId", "nomeCliente", "dataRegistro", "registrado"] {
        assert!(corpo.get(chave).is_some(), "chave ausente: {chave}");
    }
    assert_eq!(corpo["nomeCliente"], "Maria");
    Ok(())
}
