use crate::cli::{self, Command, FindArgs, LookupArgs};
use micetro_findrange::{
    find_range, lookup_range, Client, ClientBuilder, DescentBound, Error, Result, SearchQuery,
};
use std::path::Path;
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Commands
-------------------------------------------------------------------------------------------------*/

pub fn run(args: &cli::Args) -> Result<ExitCode> {
    match (&args.command, &args.args_file) {
        (Some(Command::Find(find_args)), _) => find(args, find_args),
        (Some(Command::Lookup(lookup_args)), _) => lookup(args, lookup_args),
        (Some(Command::Module { args_file }), _) => module(args_file),
        // Ansible runs binary modules as `<binary> <args_file>`
        (None, Some(args_file)) => module(args_file),
        (None, None) => Err(Error::InvalidArguments(
            "Missing subcommand or Ansible arguments file".to_string(),
        )),
    }
}

/*--------------------------------------------------------------------------------------
  Find
--------------------------------------------------------------------------------------*/

fn find(args: &cli::Args, find_args: &FindArgs) -> Result<ExitCode> {
    let client = build_client(args)?;
    let query = SearchQuery::new(&find_args.networks, find_args.prefix_length)?
        .title(&find_args.title)
        .new_title(find_args.new_title.as_deref().unwrap_or_default())
        .descent_bound(descent_bound(find_args.descent_bound));
    cli::log::query(&query, find_args.check);

    let result = find_range(&client, &query, find_args.check)?;
    cli::output::find_result(&result)?;
    Ok(ExitCode::SUCCESS)
}

/*--------------------------------------------------------------------------------------
  Lookup
--------------------------------------------------------------------------------------*/

fn lookup(args: &cli::Args, lookup_args: &LookupArgs) -> Result<ExitCode> {
    let client = build_client(args)?;
    let query = SearchQuery::new(&lookup_args.networks, lookup_args.prefix_length)?
        .title(&lookup_args.title)
        .descent_bound(descent_bound(lookup_args.descent_bound));
    cli::log::query(&query, true);

    let cidrs = lookup_range(&client, &query)?;
    cli::output::cidrs(&cidrs);
    Ok(ExitCode::SUCCESS)
}

/*--------------------------------------------------------------------------------------
  Ansible Module
--------------------------------------------------------------------------------------*/

/// Failures are reported to Ansible in the JSON result, so this only errors when stdout does.
fn module(args_file: &Path) -> Result<ExitCode> {
    let result = cli::module::read(args_file).and_then(|module_args| {
        let client = ClientBuilder::new()
            .url(&module_args.mm_provider.mm_url)
            .user(&module_args.mm_provider.mm_user)
            .password(&module_args.mm_provider.mm_password)
            .build()?;
        let query = module_args.query()?;
        cli::log::query(&query, module_args.check_mode);

        find_range(&client, &query, module_args.check_mode)
    });

    cli::output::module_result(&result)?;
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Client configured from the environment, overridden by command-line options.
fn build_client(args: &cli::Args) -> Result<Client> {
    let mut builder = ClientBuilder::new();
    if let Some(url) = &args.url {
        builder.url(url);
    }
    if let Some(user) = &args.user {
        builder.user(user);
    }
    if let Some(password) = &args.password {
        builder.password(password);
    }
    builder.build()
}

fn descent_bound(limit: Option<u8>) -> DescentBound {
    limit.map_or(DescentBound::TargetPrefix, DescentBound::Fixed)
}
