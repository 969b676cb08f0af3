use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{save_settings, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let settings = match data_dir {
        Some(dir) => Settings { data_dir: dir },
        None => Settings::default(),
    };

    let dir = std::path::PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&dir)?;

    let conn = get_connection(&dir.join("arus.db"))?;
    init_db(&conn)?;
    save_settings(&settings)?;

    println!("Initialized database at {}", dir.join("arus.db").display());
    Ok(())
}
