fn main() {
    // cfg.toml の変更時に設定を再読み込みする
    println!("cargo:rerun-if-changed=cfg.toml");

    #[cfg(feature = "esp")]
    embuild::espidf::sysenv::output();
}
