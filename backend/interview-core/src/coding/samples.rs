use models::LanguageKey;

const JAVASCRIPT_SAMPLE: &str = r##"// JS sample
function solve(input){
  return input.split("\n").map((l,i)=>"#"+i+": "+l).join("\n");
}
console.log(solve(require('fs').readFileSync(0,'utf8')));"##;

const PYTHON_SAMPLE: &str = r##"# Python sample
import sys
for i, line in enumerate(sys.stdin.read().splitlines()):
    print(f"#{i}: {line}")"##;

const CPP_SAMPLE: &str = r##"// C++ sample
#include <bits/stdc++.h>
using namespace std;
int main(){
    ios::sync_with_stdio(false);cin.tie(nullptr);
    string s; int i=0;
    while(getline(cin,s)){ cout << "#"<<i++<<": "<<s<<"\n"; }
    return 0;
}"##;

const JAVA_SAMPLE: &str = r##"// Java sample
import java.io.*;
public class Main{
  public static void main(String[] args) throws Exception{
    BufferedReader br = new BufferedReader(new InputStreamReader(System.in));
    String line; int i=0;
    while((line=br.readLine())!=null){ System.out.println("#"+i+++": "+line); }
  }
}"##;

/// Stdin echo program: prints each input line prefixed with its index.
pub fn sample_program(language: LanguageKey) -> &'static str {
    match language {
        LanguageKey::JavaScript => JAVASCRIPT_SAMPLE,
        LanguageKey::Python => PYTHON_SAMPLE,
        LanguageKey::Cpp => CPP_SAMPLE,
        LanguageKey::Java => JAVA_SAMPLE,
    }
}
