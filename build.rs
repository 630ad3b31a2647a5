// Vitrine - build.rs
//
// Embeds assets/icon.ico as a Windows executable resource so Explorer,
// the taskbar, and Alt+Tab show the proper icon with no runtime
// loading. On every other target the script does nothing; eframe
// applies the PNG icon through its viewport builder at startup.
//
// The check reads CARGO_CFG_TARGET_OS (the TARGET platform) rather
// than cfg!(target_os) (the HOST platform) so cross-compiling to
// Windows still embeds the resource.
fn main() {
    // Rerun the build script whenever the embedded icon changes.
    println!("cargo:rerun-if-changed=assets/icon.ico");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/icon.ico");
        res.compile().expect(
            "winres failed to compile Windows resources; \
             a C toolchain (MSVC or MinGW) must be available",
        );
    }
}
