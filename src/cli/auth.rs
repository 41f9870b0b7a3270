use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{cli::spotify_config, spotify, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let config = spotify_config();
    spotify::auth::auth(shared_state, config).await;
}
