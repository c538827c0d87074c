//! Command handlers
//!
//! Each handler checks that the current view owns the operation, runs it and
//! returns the rendered output ending in a status line. Failures carry the
//! status message resolved from the server response or the operation's
//! fallback text.

use common::{config::FeedSource, error::StatusMessage};
use media::{
    Media, MediaId, RatingValue,
    detail::{COMMENT_FAILED, LoadOutcome, RATING_FAILED},
    feed::LOAD_FAILED,
    upload::{UploadFile, UploadForm, upload_status},
};
use tracing::debug;

use crate::{
    cli::{Command, UploadArgs},
    dashboard::View,
    error::{CommandError, CommandResult},
    render,
    state::AppState,
};

/// Status shown when login fails without a server message
pub const LOGIN_FAILED: &str = "Network Error";

pub async fn run(state: &AppState, command: Command) -> CommandResult<String> {
    match command {
        Command::Login { email, password } => login(state, &email, &password).await,
        Command::Logout => logout(state),
        Command::Dashboard => Ok(dashboard(state)),
        Command::Upload(args) => upload(state, args).await,
        Command::Feed { search, page } => feed(state, search.unwrap_or_default(), page).await,
        Command::Show { id } => show(state, id).await,
        Command::Comment { id, text } => comment(state, id, text).await,
        Command::Rate { id, value } => rate(state, id, value).await,
    }
}

pub async fn login(state: &AppState, email: &str, password: &str) -> CommandResult<String> {
    let user = state
        .session
        .login(email, password)
        .await
        .map_err(|e| CommandError::Failed(e.status_message(LOGIN_FAILED)))?;

    let view = View::for_user(Some(&user));
    Ok(format!(
        "{}\nLogin successful",
        render::dashboard(view, Some(&user))
    ))
}

pub fn logout(state: &AppState) -> CommandResult<String> {
    state
        .session
        .logout()
        .map_err(|e| CommandError::Failed(e.status_message("Logout failed")))?;
    Ok(format!("{}\nLogged out", render::dashboard(View::Login, None)))
}

pub fn dashboard(state: &AppState) -> String {
    let user = state.session.current_user();
    render::dashboard(state.view(), user.as_ref())
}

pub async fn upload(state: &AppState, args: UploadArgs) -> CommandResult<String> {
    state.view().require(View::CreatorUpload)?;

    let file = UploadFile::from_path(&args.file)
        .await
        .map_err(|e| CommandError::Failed(e.to_string()))?;
    let mut form = UploadForm {
        file: Some(file),
        title: args.title,
        caption: args.caption,
        location: args.location,
        people: args.people,
    };

    let result = state.uploader().submit(&mut form).await;
    let status = upload_status(&result);
    match result {
        Ok(_) => Ok(status),
        Err(_) => Err(CommandError::Failed(status)),
    }
}

pub async fn feed(state: &AppState, search: String, page: u32) -> CommandResult<String> {
    state.view().require(View::ConsumerFeed)?;

    let mut feed = state.feed();
    feed.set_query(search);
    let loaded = match feed.source() {
        FeedSource::Full => feed.refresh().await,
        FeedSource::Paged => feed.go_to_page(page).await,
    };
    if let Err(e) = loaded {
        return Err(CommandError::Failed(e.status_message(LOAD_FAILED)));
    }

    let shown = feed.visible().len();
    Ok(format!(
        "{}\n\n{} photo(s) shown",
        render::feed(&feed, &state.images),
        shown
    ))
}

pub async fn show(state: &AppState, id: MediaId) -> CommandResult<String> {
    state.view().require(View::ConsumerFeed)?;

    let media = find_media(state, id).await;
    let mut detail = state.detail(media);
    match detail.load().await {
        LoadOutcome::Completed => Ok(format!(
            "{}\n\nLoaded",
            render::detail(&detail, &state.images)
        )),
        LoadOutcome::Cancelled => Err(CommandError::Failed("Cancelled".to_string())),
    }
}

pub async fn comment(state: &AppState, id: MediaId, text: String) -> CommandResult<String> {
    state.view().require(View::ConsumerFeed)?;

    let mut detail = state.detail(Media::with_id(id));
    detail.set_draft(text);
    match detail.post_comment().await {
        Ok(()) => Ok(format!(
            "{}\n\n{}",
            render::comments(detail.comments()),
            detail.status().unwrap_or("Comment added")
        )),
        Err(e) => Err(CommandError::Failed(
            detail
                .status()
                .map(str::to_string)
                .unwrap_or_else(|| e.status_message(COMMENT_FAILED)),
        )),
    }
}

pub async fn rate(state: &AppState, id: MediaId, value: u8) -> CommandResult<String> {
    state.view().require(View::ConsumerFeed)?;

    let value = RatingValue::try_from(value)
        .map_err(|e| CommandError::Failed(e.status_message(RATING_FAILED)))?;

    let mut detail = state.detail(Media::with_id(id));
    match detail.submit_rating(value).await {
        Ok(()) => Ok(format!(
            "{}\n\n{}",
            render::rating(&detail),
            detail.status().unwrap_or("Rated")
        )),
        Err(e) => Err(CommandError::Failed(
            detail
                .status()
                .map(str::to_string)
                .unwrap_or_else(|| e.status_message(RATING_FAILED)),
        )),
    }
}

/// Media record for `id` from the listing, or a bare record when it is not listed
async fn find_media(state: &AppState, id: MediaId) -> Media {
    let mut feed = state.feed();
    if let Err(e) = feed.refresh().await {
        debug!("Listing unavailable while opening {}: {}", id, e);
        return Media::with_id(id);
    }

    let wanted = id.to_string();
    feed.items()
        .iter()
        .find(|media| media.id.to_string() == wanted)
        .cloned()
        .unwrap_or_else(|| Media::with_id(id))
}
