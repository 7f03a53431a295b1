// SPDX-License-Identifier: AGPL-3.0-or-later

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure().build_server(true).build_client(true).compile_protos(
        &[
            "proto/tinyim/common.proto",
            "proto/tinyim/access.proto",
            "proto/tinyim/logic.proto",
            "proto/tinyim/dbproxy.proto",
        ],
        &["proto"],
    )?;
    Ok(())
}
