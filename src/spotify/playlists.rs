use crate::{
    Res,
    library::PlaylistService,
    spotify::{SpotifyClient, client::spinner},
    types::{
        ChangePlaylistDetailsRequest, Playlist, PlaylistItem, RemoveTracksRequest,
        SnapshotResponse, TrackRemoval, User,
    },
};

/// Maximum page size of `GET /me/playlists`.
const PLAYLIST_PAGE_LIMIT: u32 = 50;
/// Maximum page size of `GET /playlists/{id}/tracks`.
const ITEM_PAGE_LIMIT: u32 = 100;

impl SpotifyClient {
    /// `GET /me` - the user the token belongs to.
    pub async fn current_user(&mut self) -> Result<User, reqwest::Error> {
        let url = self.url("/me");
        self.send(|http| http.get(&url)).await?.json::<User>().await
    }

    /// `GET /me/playlists` - every playlist the user owns or follows.
    pub async fn get_user_playlists(&mut self) -> Result<Vec<Playlist>, reqwest::Error> {
        let url = self.url(&format!("/me/playlists?limit={}", PLAYLIST_PAGE_LIMIT));
        let pb = spinner("Fetching playlists...");
        let result = self.get_all_pages(url, &pb, "playlists").await;
        pb.finish_and_clear();
        Ok(result?.into_iter().flatten().collect())
    }

    /// `GET /playlists/{id}/tracks` - all items in playlist order.
    ///
    /// The index of an item in the returned vector is its playlist position.
    pub async fn get_playlist_items(
        &mut self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, reqwest::Error> {
        let url = self.url(&format!(
            "/playlists/{id}/tracks?limit={limit}&fields=items(track(uri,name,album(id))),next,total",
            id = playlist_id,
            limit = ITEM_PAGE_LIMIT
        ));
        let pb = spinner("Fetching playlist tracks...");
        let result = self.get_all_pages(url, &pb, "tracks").await;
        pb.finish_and_clear();

        // a null slot still occupies its position
        Ok(result?
            .into_iter()
            .map(|item| item.unwrap_or(PlaylistItem { track: None }))
            .collect())
    }

    /// `DELETE /playlists/{id}/tracks` - removes exactly the given positions.
    pub async fn remove_specific_occurrences(
        &mut self,
        playlist_id: &str,
        removals: &[TrackRemoval],
    ) -> Result<SnapshotResponse, reqwest::Error> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        let body = RemoveTracksRequest {
            tracks: removals.to_vec(),
        };
        self.send(|http| http.delete(&url).json(&body))
            .await?
            .json::<SnapshotResponse>()
            .await
    }

    /// `PUT /playlists/{id}` - changes the public flag.
    pub async fn change_visibility(
        &mut self,
        playlist_id: &str,
        public: bool,
    ) -> Result<(), reqwest::Error> {
        let url = self.url(&format!("/playlists/{}", playlist_id));
        let body = ChangePlaylistDetailsRequest { public };
        self.send(|http| http.put(&url).json(&body)).await?;
        Ok(())
    }
}

impl PlaylistService for SpotifyClient {
    async fn playlists(&mut self) -> Res<Vec<Playlist>> {
        Ok(self.get_user_playlists().await?)
    }

    async fn playlist_items(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        Ok(self.get_playlist_items(playlist_id).await?)
    }

    async fn remove_tracks(&mut self, playlist_id: &str, removals: &[TrackRemoval]) -> Res<()> {
        self.remove_specific_occurrences(playlist_id, removals)
            .await?;
        Ok(())
    }

    async fn make_public(&mut self, playlist_id: &str) -> Res<()> {
        Ok(self.change_visibility(playlist_id, true).await?)
    }
}
