//! `aiot`: command-line front end for the AIoT platform gateway.
//!
//! Every subcommand maps onto one `aiot-client` operation (a few combine
//! two) and prints its result to stdout as pretty JSON:
//!
//! - **`login`**, **`verify`**, **`profile`**, **`reset-password`**: accounts.
//! - **`thing`** / **`channel`**: create, list, inspect, update, delete.
//! - **`connect`** / **`disconnect`**: link things to channels.
//! - **`gateway`**: gateway management, status and device counts.
//!
//! The gateway address and token come from `--addr` / `--token` or the
//! `AIOT_GATEWAY_ADDR` / `AIOT_TOKEN` environment variables:
//!
//! ```sh
//! export AIOT_GATEWAY_ADDR=https://iot.example.com/api
//! export AIOT_TOKEN=$(aiot login operator@example.com --password secret | jq -r .token)
//! aiot thing create greenhouse-sensor --meta site=north
//! aiot thing list --limit 5 --dir asc
//! ```
//!
//! Exit codes: 0 on success, 1 when the gateway call fails, 2 for usage or
//! configuration problems.

use std::process;

use aiot_client::{
    options::DEFAULT_LIMIT, Client, ClientConfig, ConnectionOptions, CreateChannelInput,
    CreateGatewayInput, CreateThingInput, Direction, Metadata, Order, PageOptions,
    UpdateChannelInput, UpdateGatewayInput, UpdateThingInput,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

/// aiot: AIoT platform gateway CLI
///
/// Manage things, channels and gateways on an AIoT platform.
#[derive(Parser, Debug)]
#[command(name = "aiot", version, about, long_about = None)]
struct Cli {
    /// Gateway base URL, e.g. https://iot.example.com/api
    #[arg(long, env = "AIOT_GATEWAY_ADDR", global = true)]
    addr: Option<String>,

    /// Token returned by `aiot login`.
    #[arg(long, env = "AIOT_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Send the token without the `Bearer ` prefix (older gateways).
    #[arg(long, global = true)]
    bare_auth: bool,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange email and password for a token.
    Login {
        email: String,

        #[arg(long, env = "AIOT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check that the token is accepted.
    Verify,

    /// Show the profile of the token's owner.
    Profile,

    /// Change the account password.
    ResetPassword {
        #[arg(long, value_name = "PASSWORD")]
        old: String,

        #[arg(long, value_name = "PASSWORD")]
        new: String,
    },

    /// Manage things (devices).
    #[command(subcommand)]
    Thing(ThingCommand),

    /// Manage channels.
    #[command(subcommand)]
    Channel(ChannelCommand),

    /// Connect things to channels.
    ///
    /// The n-th --channel is connected to the n-th --thing:
    ///   aiot connect --channel C1 --thing T1 --channel C2 --thing T2
    Connect {
        #[arg(long = "channel", value_name = "ID", required = true)]
        channels: Vec<String>,

        #[arg(long = "thing", value_name = "ID", required = true)]
        things: Vec<String>,
    },

    /// Remove the connection between one thing and one channel.
    Disconnect {
        #[arg(long, value_name = "ID")]
        channel: String,

        #[arg(long, value_name = "ID")]
        thing: String,
    },

    /// Manage gateways.
    #[command(subcommand)]
    Gateway(GatewayCommand),
}

#[derive(Subcommand, Debug)]
enum ThingCommand {
    /// Register a thing.
    Create {
        name: String,

        /// Metadata entry; repeat for more: --meta site=north --meta rack=4
        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_entry)]
        meta: Vec<(String, String)>,
    },

    /// List your things.
    List(ListArgs),

    /// Show one thing.
    Get { id: String },

    /// Rename a thing. Metadata is kept unless --meta is given.
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_entry)]
        meta: Vec<(String, String)>,
    },

    /// Delete a thing.
    Delete { id: String },

    /// List the channels a thing is connected to.
    Channels {
        id: String,

        #[command(flatten)]
        list: ListArgs,

        /// List the channels it is NOT connected to instead.
        #[arg(long)]
        disconnected: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ChannelCommand {
    /// Create a channel.
    Create {
        name: String,

        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_entry)]
        meta: Vec<(String, String)>,
    },

    /// List your channels.
    List(ListArgs),

    /// Show one channel.
    Get { id: String },

    /// Rename a channel. Metadata is kept unless --meta is given.
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_entry)]
        meta: Vec<(String, String)>,
    },

    /// Delete a channel.
    Delete { id: String },

    /// List the things connected to a channel.
    Things {
        id: String,

        #[command(flatten)]
        list: ListArgs,

        /// List the things NOT connected to it instead.
        #[arg(long)]
        disconnected: bool,
    },
}

#[derive(Subcommand, Debug)]
enum GatewayCommand {
    /// Create a gateway on top of an existing thing.
    Create {
        name: String,

        #[arg(long, default_value = "")]
        desc: String,

        /// Id of the thing backing the gateway.
        #[arg(long, value_name = "ID")]
        thing: String,
    },

    /// List your gateways.
    List,

    /// Show one gateway.
    Get { id: String },

    /// Replace a gateway's name and description.
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        desc: String,
    },

    /// Delete a gateway. Its thing is kept.
    Delete { id: String },

    /// Show the connectivity of every gateway.
    Status,

    /// Count the devices currently online behind a gateway.
    ActiveDevices { id: String },
}

/// Pagination flags shared by the list subcommands.
#[derive(Args, Debug, Clone)]
struct ListArgs {
    #[arg(long, default_value_t = 0)]
    offset: u64,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u64,

    /// name | key | id
    #[arg(long, default_value = "name")]
    order: Order,

    /// asc | desc
    #[arg(long, default_value = "desc")]
    dir: Direction,
}

impl ListArgs {
    fn options(&self) -> PageOptions {
        PageOptions::default()
            .with_offset(self.offset)
            .with_limit(self.limit)
            .with_order(self.order)
            .with_direction(self.dir)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aiot_client=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli);

    if let Err(e) = run(&client, cli.token.as_deref(), cli.command).await {
        eprintln!("aiot: {e}");
        process::exit(1);
    }
}

/// Resolve the client configuration: flags first, then the environment.
fn build_client(cli: &Cli) -> Client {
    let config = ClientConfig::from_lookup(|name| match name {
        "AIOT_GATEWAY_ADDR" => cli.addr.clone(),
        "AIOT_AUTH_SCHEME" if cli.bare_auth => Some("bare".into()),
        "AIOT_TIMEOUT_SECS" => cli
            .timeout_secs
            .map(|s| s.to_string())
            .or_else(|| std::env::var(name).ok()),
        _ => std::env::var(name).ok(),
    })
    .unwrap_or_else(|e| fatal(&e.to_string()));

    Client::from_config(config).unwrap_or_else(|e| fatal(&e.to_string()))
}

async fn run(client: &Client, token: Option<&str>, command: Command) -> aiot_client::Result<()> {
    let token = || token.unwrap_or_else(|| fatal("no token: pass --token or set AIOT_TOKEN"));

    match command {
        Command::Login { email, password } => {
            let token = client.authenticate(&email, &password).await?;
            print_json(&json!({ "token": token }));
        }
        Command::Verify => {
            let valid = client.verify_token(token()).await?;
            print_json(&json!({ "valid": valid }));
        }
        Command::Profile => print_json(&client.user_profile(token()).await?),
        Command::ResetPassword { old, new } => {
            client.reset_password(token(), &new, &old).await?;
            print_ok();
        }

        Command::Thing(cmd) => run_thing(client, token(), cmd).await?,
        Command::Channel(cmd) => run_channel(client, token(), cmd).await?,

        Command::Connect { channels, things } => {
            client.connect(token(), &channels, &things).await?;
            print_ok();
        }
        Command::Disconnect { channel, thing } => {
            client.disconnect(token(), &channel, &thing).await?;
            print_ok();
        }

        Command::Gateway(cmd) => run_gateway(client, token(), cmd).await?,
    }
    Ok(())
}

async fn run_thing(client: &Client, token: &str, cmd: ThingCommand) -> aiot_client::Result<()> {
    match cmd {
        ThingCommand::Create { name, meta } => {
            let input = CreateThingInput::new(name).with_metadata(to_metadata(meta));
            print_json(&client.create_thing(token, input).await?);
        }
        ThingCommand::List(list) => {
            print_json(&client.list_things_by_user(token, &list.options()).await?);
        }
        ThingCommand::Get { id } => print_json(&client.thing_profile(token, &id).await?),
        ThingCommand::Update { id, name, meta } => {
            let metadata = if meta.is_empty() {
                client.thing_profile(token, &id).await?.metadata
            } else {
                to_metadata(meta)
            };
            client
                .update_thing(token, UpdateThingInput { id, name, metadata })
                .await?;
            print_ok();
        }
        ThingCommand::Delete { id } => {
            client.delete_thing(token, &id).await?;
            print_ok();
        }
        ThingCommand::Channels {
            id,
            list,
            disconnected,
        } => {
            let opts = connection_options(&list, disconnected);
            print_json(&client.list_channels_by_thing(token, &id, &opts).await?);
        }
    }
    Ok(())
}

async fn run_channel(client: &Client, token: &str, cmd: ChannelCommand) -> aiot_client::Result<()> {
    match cmd {
        ChannelCommand::Create { name, meta } => {
            let input = CreateChannelInput::new(name).with_metadata(to_metadata(meta));
            print_json(&client.create_channel(token, input).await?);
        }
        ChannelCommand::List(list) => {
            print_json(&client.list_channels_by_user(token, &list.options()).await?);
        }
        ChannelCommand::Get { id } => print_json(&client.channel_profile(token, &id).await?),
        ChannelCommand::Update { id, name, meta } => {
            let metadata = if meta.is_empty() {
                client.channel_profile(token, &id).await?.metadata
            } else {
                to_metadata(meta)
            };
            client
                .update_channel(token, UpdateChannelInput { id, name, metadata })
                .await?;
            print_ok();
        }
        ChannelCommand::Delete { id } => {
            client.delete_channel(token, &id).await?;
            print_ok();
        }
        ChannelCommand::Things {
            id,
            list,
            disconnected,
        } => {
            let opts = connection_options(&list, disconnected);
            print_json(&client.list_things_by_channel(token, &id, &opts).await?);
        }
    }
    Ok(())
}

async fn run_gateway(client: &Client, token: &str, cmd: GatewayCommand) -> aiot_client::Result<()> {
    match cmd {
        GatewayCommand::Create { name, desc, thing } => {
            let input = CreateGatewayInput {
                name,
                description: desc,
                thing_id: thing,
            };
            client.create_gateway(token, input).await?;
            print_ok();
        }
        GatewayCommand::List => print_json(&client.list_gateways(token).await?),
        GatewayCommand::Get { id } => print_json(&client.gateway_profile(token, &id).await?),
        GatewayCommand::Update { id, name, desc } => {
            let input = UpdateGatewayInput {
                id,
                name,
                description: desc,
            };
            client.update_gateway(token, input).await?;
            print_ok();
        }
        GatewayCommand::Delete { id } => {
            client.delete_gateway(token, &id).await?;
            print_ok();
        }
        GatewayCommand::Status => print_json(&client.gateway_statuses(token).await?),
        GatewayCommand::ActiveDevices { id } => {
            let count = client.gateway_active_device_count(token, &id).await?;
            print_json(&json!({ "id": id, "count": count }));
        }
    }
    Ok(())
}

fn connection_options(list: &ListArgs, disconnected: bool) -> ConnectionOptions {
    ConnectionOptions::default()
        .with_page(list.options())
        .with_disconnected(disconnected)
}

/// Parse a `KEY=VALUE` metadata entry.
fn parse_entry(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

fn to_metadata(entries: Vec<(String, String)>) -> Metadata {
    entries.into_iter().collect()
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{out}"),
        Err(e) => fatal(&format!("failed to render output: {e}")),
    }
}

fn print_ok() {
    print_json(&json!({ "ok": true }));
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("aiot: {}", msg);
    process::exit(2);
}
