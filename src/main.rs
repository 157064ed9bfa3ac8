use entity_recipe::clients::InMemoryClient;
use entity_recipe::framework::json::to_fields;
use entity_recipe::framework::{Entity, EntityError, Gateway, Params};
use entity_recipe::lifecycle::{build_session, install_default, setup_tracing};
use entity_recipe::model::{Board, Card};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, info_span};

#[derive(Serialize)]
struct Seed<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    board_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    list_id: Option<&'a str>,
}

impl<'a> Seed<'a> {
    fn new(id: &'a str, name: &'a str) -> Self {
        Self { id: Some(id), name, board_id: None, list_id: None }
    }

    fn unsaved(name: &'a str) -> Self {
        Self { id: None, name, board_id: None, list_id: None }
    }

    fn on(mut self, board_id: &'a str, list_id: Option<&'a str>) -> Self {
        self.board_id = Some(board_id);
        self.list_id = list_id;
        self
    }
}

fn seed(store: &InMemoryClient) -> Result<(), EntityError> {
    store.insert("board", to_fields(&Seed::new("b1", "Roadmap"))?);
    store.insert("list", to_fields(&Seed::new("l1", "Todo").on("b1", None))?);
    store.insert("list", to_fields(&Seed::new("l2", "Done").on("b1", None))?);
    store.insert("card", to_fields(&Seed::new("c1", "Write docs").on("b1", Some("l1")))?);
    store.insert("card", to_fields(&Seed::new("c2", "Ship it").on("b1", Some("l1")))?);
    Ok(())
}

fn run() -> Result<(), EntityError> {
    let store = Arc::new(InMemoryClient::new());
    seed(&store)?;

    let session = build_session(store);
    if install_default(session.clone()).is_err() {
        error!("Default session already installed");
    }

    let board = info_span!("board_lookup").in_scope(|| Board::find(&session, "b1", &Params::new()))?;
    info!(name = board.name(), "Found board");

    for list in board.lists(&Params::new())?.iter() {
        let cards = list.cards(&Params::new())?;
        info!(list = list.get_str("name"), cards = cards.len(), "List");
    }

    let done = board
        .lists(&Params::new())?
        .into_vec()
        .into_iter()
        .find(|list| list.get_str("name") == Some("Done"));

    let _span = info_span!("card_move").entered();
    let mut card = Card::find(&session, "c1", &Params::new())?;
    if let Some(done) = done {
        card.move_to_list(&done)?;
    }
    info!(changed = ?card.attributes().changed(), "Persisting card");
    card.persist()?;

    let list = card.list()?;
    info!(card = card.name(), list = list.get_str("name"), "Card moved");

    let options = to_fields(&Seed::unsaved("Celebrate").on("b1", Some("l2")))?;
    let created = Card::save(&session, &options)?;
    info!(id = %created.id(), "Created card");
    Ok(())
}

fn main() {
    setup_tracing();
    if let Err(e) = run() {
        error!(error = %e, "Demo failed");
        std::process::exit(1);
    }
}
