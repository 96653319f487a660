use log::info;
use micetro_findrange::{DescentBound, SearchQuery};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Search Query
--------------------------------------------------------------------------------------*/

pub fn query(query: &SearchQuery, dry_run: bool) {
    let count_networks = query.networks.len();
    info!(
        "Searching {count_networks} network(s) for a /{} range with a title containing {:?}",
        query.prefix_length, query.title
    );

    if let DescentBound::Fixed(limit) = query.descent_bound {
        info!("Descending only into ranges shorter than /{limit}");
    }

    match (&query.new_title, dry_run) {
        (Some(new_title), true) => info!("Dry run; the title would be set to {new_title:?}"),
        (Some(new_title), false) => info!("The title will be set to {new_title:?}"),
        (None, _) => (),
    }
}
