use presencewire::adv::{MAX_SECTION_LENGTH, PRESENCE_UUID};
use presencewire::crypto::MIC_LENGTH;
use presencewire::element::PRESENCE_VERSION_V1;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("presencewire {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: presencewire");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("advertisement_version: {PRESENCE_VERSION_V1}");
    println!(
        "service_uuid: 0x{:02X}{:02X}",
        PRESENCE_UUID[0], PRESENCE_UUID[1]
    );
    println!("max_section_length: {MAX_SECTION_LENGTH}");
    println!("cryptor: mic (hkdf-sha256, aes-128-ctr, hmac-sha256/{MIC_LENGTH})");

    Ok(SUCCESS)
}
