#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LEITE: &str = "7891000100103";
pub const ARROZ: &str = "7890000000019";
pub const NO_ADDRESS: &str = "7890000000026";

pub fn etq() -> Command {
    cargo_bin_cmd!("etiqueta")
}

/// Isolated workstation: temp HOME, reference tables, history and database.
pub struct Workstation {
    pub dir: TempDir,
}

impl Workstation {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let ws = Self { dir };
        ws.write_tables();
        ws
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_tables(&self) {
        fs::write(
            self.path("BASE_CADASTRO.json"),
            format!(
                r#"{{"BASE_CADASTRO":[
                    {{"BARRAS":"{LEITE}","CODDV":"621412","DESC":"Leite"}},
                    {{"BARRAS":"{ARROZ}","CODDV":"100018","DESC":"Arroz Tipo 1"}},
                    {{"BARRAS":"{NO_ADDRESS}","CODDV":"5","DESC":"Sem Endereco"}}
                ]}}"#
            ),
        )
        .expect("write products");

        fs::write(
            self.path("BASE_END.json"),
            r#"{"BASE_END":[
                {"CODDV":"621412","TIPO":"PULMÃO","ENDERECO":"PG06.001.019.100"},
                {"CODDV":"621412","TIPO":"SEPARACAO","ENDERECO":"M205.001"},
                {"CODDV":"621412","TIPO":"PULMÃO","ENDERECO":"PG06.001.019.934"},
                {"CODDV":"100018","TIPO":"PULMÃO","ENDERECO":"PG02.003.004.510"},
                {"TIPO":"PULMÃO","ENDERECO":"PG99.999.999.999"}
            ]}"#,
        )
        .expect("write addresses");
    }

    /// `etiqueta` with every path pointed inside the workstation dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = etq();
        cmd.env("HOME", self.dir.path())
            .env("APPDATA", self.dir.path())
            .arg("--test")
            .arg("--db")
            .arg(self.path("etiqueta.sqlite"))
            .arg("--products")
            .arg(self.path("BASE_CADASTRO.json"))
            .arg("--addresses")
            .arg(self.path("BASE_END.json"))
            .arg("--history")
            .arg(self.path("history.json"))
            .arg("--out-dir")
            .arg(self.path("labels"));
        cmd
    }

    pub fn history(&self) -> serde_json::Value {
        read_json(&self.path("history.json"))
    }

    pub fn label_page(&self) -> String {
        fs::read_to_string(self.path("labels").join("last-labels.html")).unwrap_or_default()
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).expect("valid json"),
        Err(_) => serde_json::Value::Array(vec![]),
    }
}
