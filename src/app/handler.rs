use {
    crate::app::report::{
        connectivity_line, pool_balance_lines, user_state_lines, UserReport,
    },
    crate::constants::POOL_ROLE,
    crate::libs::config::{load_env, Config},
    crate::libs::inputs::{load_address_book, load_descriptor, load_user_reference},
    crate::libs::writing::{cc, save_log_to_file, Colors},
    crate::log,
    anyhow::{Context, Result},
    ethpool::{parse_address, ContractStateReader, RpcTransport},
    std::{io::Write, str::FromStr},
};

/// Which report(s) to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Balance,
    User,
    All,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balance" | "balanceof" | "pool" => Ok(Self::Balance),
            "user" | "userstate" | "users" => Ok(Self::User),
            "" | "all" => Ok(Self::All),
            other => anyhow::bail!("unknown mode `{other}`, expected balance | user | all"),
        }
    }
}

pub async fn init() -> Result<()> {
    load_env();
    let cfg = Config::new();
    let mode: Mode = std::env::args().nth(1).unwrap_or_default().parse()?;
    save_log_to_file(&format!("[init] mode={mode:?} cfg={cfg:?}"));

    let descriptor = load_descriptor(&cfg.abi_path)?;
    let book = load_address_book(&cfg.addresses_path)?;
    let pool = book
        .role(POOL_ROLE.as_str())
        .with_context(|| format!("{} has no usable pool address", cfg.addresses_path.display()))?;
    let reader = ContractStateReader::new(&cfg.eth_rpc, pool, &descriptor)
        .context("Failed to set up the pool reader")?;
    log!(cc::LIGHT_GREEN, "pool {} via {}", reader.contract(), cfg.eth_rpc);

    let users: Vec<String> = if mode == Mode::Balance {
        Vec::new()
    } else {
        load_user_reference(&cfg.user_path)?
            .addresses()
            .into_iter()
            .map(str::to_owned)
            .collect()
    };

    let stdout = std::io::stdout();
    let mut out = Colors::stdout(stdout.lock());
    run(&reader, mode, &users, &cfg.eth_rpc, &mut out).await
}

/// Connectivity probe, then the requested reports, strictly one call after
/// another. The first error aborts the run.
pub async fn run<T: RpcTransport, W: Write>(
    reader: &ContractStateReader<T>,
    mode: Mode,
    users: &[String],
    endpoint: &str,
    out: &mut Colors<W>,
) -> Result<()> {
    let listening = reader
        .check_connectivity()
        .await
        .with_context(|| format!("Failed to reach {endpoint}"))?;
    out.cprint(&connectivity_line(endpoint, listening), cc::LIGHT_GRAY);
    if !listening {
        crate::warn!("{endpoint} reports it is not listening; continuing");
    }

    if matches!(mode, Mode::Balance | Mode::All) {
        let bal = reader
            .get_pool_balance()
            .await
            .context("Failed to read the pool balance")?;
        save_log_to_file(&format!(
            "[pool] reward={} staked={} total={}",
            bal.reward, bal.staked, bal.total
        ));
        out.cprint("", cc::RESET);
        for line in pool_balance_lines(reader.contract(), &bal) {
            out.cprint(&line, cc::LIGHT_CYAN);
        }
    }

    if matches!(mode, Mode::User | Mode::All) {
        if users.is_empty() {
            crate::warn!("user file lists no addresses");
        }
        for raw in users {
            let report = user_report(reader, raw)
                .await
                .with_context(|| format!("Failed to read state for user {raw}"))?;
            out.cprint("", cc::RESET);
            for line in user_state_lines(&report) {
                out.cprint(&line, cc::CYAN);
            }
        }
    }
    Ok(())
}

async fn user_report<T: RpcTransport>(
    reader: &ContractStateReader<T>,
    raw: &str,
) -> Result<UserReport> {
    let state = reader.get_user_state(raw).await?;
    let available = reader.get_user_available(raw).await?;
    let reward = reader.get_user_reward(raw).await?;
    save_log_to_file(&format!("[user] {raw} state={state:?}"));
    Ok(UserReport {
        user: parse_address(raw)?,
        state,
        available,
        reward,
    })
}
