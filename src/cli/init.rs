use serde_json::json;

use crate::db::connection;

pub fn run(json_output: bool, owner_flag: Option<&str>) -> i32 {
    let result = connection::init_db().and_then(|path| {
        let owner = owner_flag
            .map(str::to_string)
            .unwrap_or_else(connection::default_owner);
        connection::write_owner(&owner)?;
        Ok((path, owner))
    });

    match result {
        Ok((path, owner)) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "success": true,
                        "data": { "path": path.to_string_lossy(), "owner": owner }
                    }))
                    .unwrap()
                );
            } else {
                println!("Initialized taskdown at {} (owner: {owner})", path.display());
            }
            0
        }
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&crate::output::json::error(&e)).unwrap()
                );
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}
