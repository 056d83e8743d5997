#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let icon = "res/etiqueta.ico";
    println!("cargo:rerun-if-changed={icon}");

    let mut res = WindowsResource::new();
    if std::path::Path::new(icon).exists() {
        res.set_icon(icon);
    }
    res.set("FileDescription", "Etiqueta CLI")
        .set("ProductName", "Etiqueta")
        .set("OriginalFilename", "etiqueta.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
