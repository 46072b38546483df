use brightsync_core::search::{search_videos, StatusFilter};

use crate::commands::common::{
    format_video_lines, normalize_search_query, open_database, print_lines, video_to_list_item,
    CommandContext, VideoListItem,
};
use crate::error::CliError;

pub fn run_search(
    context: &CommandContext<'_>,
    keywords: &[String],
    include_unpublished: bool,
    limit: usize,
    as_json: bool,
) -> Result<(), CliError> {
    let query = normalize_search_query(keywords)?;
    let filter = if include_unpublished {
        StatusFilter::ALL
    } else {
        StatusFilter::PUBLISHED
    };

    let db = open_database(context.db_path)?;
    let videos = search_videos(&db.videos(), &query, filter, limit)?;

    if as_json {
        let json_items = videos
            .iter()
            .map(video_to_list_item)
            .collect::<Vec<VideoListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        print_lines(&format_video_lines(&videos));
    }

    Ok(())
}
