fn main() {
    if !cfg!(test) {
        // Generate C header for the raw service key interface
        let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
        match cbindgen::Builder::new()
            .with_crate(crate_dir)
            .with_language(cbindgen::Language::C)
            .with_no_includes()
            .with_sys_include("stdint.h")
            .with_include_guard("SAISKEY_H")
            .generate()
        {
            Ok(bindings) => {
                bindings.write_to_file("target/saiskey.h");
            }
            Err(e) => println!("cargo:warning=Unable to generate C header: {e}"),
        }
    }
}
