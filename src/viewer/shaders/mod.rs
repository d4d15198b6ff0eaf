pub mod phong;

fn compile_shader(
    source_text: &str,
    tag: &str,
    shader_kind: shaderc::ShaderKind,
    compiler: &mut shaderc::Compiler,
    device: &wgpu::Device,
) -> wgpu::ShaderModule {
    let spirv = compiler
        .compile_into_spirv(source_text, shader_kind, tag, "main", None)
        .unwrap();
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(tag),
        source: wgpu::util::make_spirv(spirv.as_binary_u8()),
    })
}
