fn main() {
    // Only compile Windows resources on Windows target
    #[cfg(target_os = "windows")]
    {
        // Embed the Windows resource script (built-in string table)
        let _ = embed_resource::compile("resources/windows/deskpins.rc", embed_resource::NONE);
    }
}
